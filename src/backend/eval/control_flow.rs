//! Control flow forms: `if` and `quote`.

use crate::backend::models::{Atom, Bindings, Grounded};

use super::trampoline::{push_frame, Action, Branch, Cont, Ctx, Frame, SpecialCall};

/// (if COND THEN ELSE)
///
/// `COND` is evaluated; each result selects a branch. Only the selected
/// branch is evaluated.
pub(crate) fn eval_if(call: SpecialCall<'_>) -> Action {
    require_three_args!(call, "if");
    let condition = call.bindings.apply_to(&call.args[0]);
    let frame = Frame::IfBranch {
        then: call.args[1].clone(),
        otherwise: call.args[2].clone(),
        expr: call.expr.clone(),
        ctx: call.ctx.clone(),
    };
    Action::Push(Branch::eval(
        condition,
        call.ctx.clone(),
        push_frame(frame, call.cont),
        call.bindings,
    ))
}

pub(crate) fn resume_if(
    then: &Atom,
    otherwise: &Atom,
    expr: &Atom,
    ctx: &Ctx,
    value: Atom,
    next: Cont,
    bindings: Bindings,
) -> Action {
    let chosen = match value {
        Atom::Grounded(Grounded::Bool(true)) => then,
        Atom::Grounded(Grounded::Bool(false)) => otherwise,
        err if err.is_error() => return Action::Push(Branch::ret(err, next, bindings)),
        other => {
            let message = format!("if condition must be True or False, got {}", other);
            let err = Atom::error(bindings.apply_to(expr), &message);
            return Action::Push(Branch::ret(err, next, bindings));
        }
    };
    let chosen = bindings.apply_to(chosen);
    Action::Push(Branch::eval(chosen, ctx.deeper(), next, bindings))
}

/// (quote EXPR): a normal form, returned as-is.
pub(crate) fn eval_quote(call: SpecialCall<'_>) -> Action {
    require_one_arg!(call, "quote");
    let quoted = call.expr.clone();
    call.ret(quoted)
}
