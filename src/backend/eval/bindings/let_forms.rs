//! Let binding forms.

use tracing::trace;

use crate::backend::models::{Atom, Bindings};

use super::super::pattern::unify_into;
use super::super::trampoline::{push_frame, Action, Branch, Cont, Ctx, Frame, SpecialCall};

/// (let PATTERN INIT BODY)
///
/// `INIT` is evaluated; each of its results is unified with `PATTERN` and
/// `BODY` is evaluated under the extended bindings. Results that do not
/// unify are dropped.
pub(crate) fn eval_let(call: SpecialCall<'_>) -> Action {
    require_three_args!(call, "let");
    let pattern = call.args[0].clone();
    let init = call.bindings.apply_to(&call.args[1]);
    let body = call.args[2].clone();
    let frame = Frame::LetBody {
        pattern,
        body,
        ctx: call.ctx.clone(),
    };
    Action::Push(Branch::eval(
        init,
        call.ctx.clone(),
        push_frame(frame, call.cont),
        call.bindings,
    ))
}

/// Continue a `let` with one result of its initializer.
pub(crate) fn resume_let(
    pattern: &Atom,
    body: &Atom,
    ctx: &Ctx,
    value: Atom,
    next: Cont,
    bindings: Bindings,
) -> Action {
    if value.is_error() {
        return Action::Push(Branch::ret(value, next, bindings));
    }
    let mut extended = bindings;
    if !unify_into(pattern, &value, &mut extended) {
        trace!(target: "mettaspace::backend::eval::let", %pattern, %value, "let pattern mismatch");
        return Action::Prune;
    }
    let body = extended.apply_to(body);
    Action::Push(Branch::eval(body, ctx.deeper(), next, extended))
}

/// (let* ((P1 V1) ... (Pn Vn)) BODY)
///
/// Transforms to nested let: (let P1 V1 (let* ((P2 V2) ...) BODY)).
/// Each binding can use variables from previous bindings.
pub(crate) fn eval_let_star(call: SpecialCall<'_>) -> Action {
    require_two_args!(call, "let*");
    let args = call.args;
    let pairs = match &args[0] {
        Atom::Expression(pairs) => pairs,
        _ => return call.error("let* bindings must be a list of (pattern value) pairs"),
    };
    let body = args[1].clone();

    let mut nested = body;
    for pair in pairs.iter().rev() {
        match pair {
            Atom::Expression(pv) if pv.len() == 2 => {
                nested = Atom::expr(vec![Atom::sym("let"), pv[0].clone(), pv[1].clone(), nested]);
            }
            _ => {
                let message = format!("let* binding must be a (pattern value) pair, got {}", pair);
                return call.error(&message);
            }
        }
    }
    let nested = call.bindings.apply_to(&nested);
    Action::Push(Branch::eval(nested, call.ctx.deeper(), call.cont, call.bindings))
}
