//! Nondeterminism: `superpose` opens alternatives, `collapse` gathers them.

use tracing::trace;

use crate::backend::models::Atom;
use crate::error::MettaError;

use super::super::trampoline::{Action, Branch, Interpreter, SpecialCall};

/// (superpose (A1 ... An)): one branch per element, each evaluated.
pub(crate) fn eval_superpose(call: SpecialCall<'_>) -> Action {
    require_one_arg!(call, "superpose");
    let elements = match call.bindings.apply_to(&call.args[0]) {
        Atom::Expression(elements) => elements,
        other => {
            let message = format!("superpose expects an expression, got {}", other);
            return call.error(&message);
        }
    };
    let ctx = call.ctx.deeper();
    let cont = call.cont;
    let bindings = call.bindings;
    Action::Fork(Box::new(elements.into_iter().map(move |element| {
        Branch::eval(element, ctx.clone(), cont.clone(), bindings.clone())
    })))
}

/// (collapse EXPR): every result of `EXPR`, in order, as one expression.
///
/// The inner evaluation runs to completion before the outer branch
/// continues. A depth-limit failure inside propagates to the whole query.
pub(crate) fn eval_collapse(call: SpecialCall<'_>) -> Result<Action, MettaError> {
    if call.args.len() != 1 {
        return Ok(call.error("collapse requires exactly 1 argument"));
    }
    let inner = call.bindings.apply_to(&call.args[0]);
    let branch = Branch::eval(inner, call.ctx.clone(), None, call.bindings.clone());
    let results = Interpreter::from_branch(branch, call.env).collect::<Result<Vec<_>, _>>()?;
    trace!(target: "mettaspace::backend::eval::collapse", count = results.len(), "collapsed");
    Ok(call.ret(Atom::expr(results)))
}
