//! The `unify` form.

use super::super::pattern::unify_into;
use super::super::trampoline::{Action, Branch, SpecialCall};

/// (unify A B THEN ELSE)
///
/// Neither `A` nor `B` is evaluated. When they unify under the current
/// bindings `THEN` is evaluated with the extended bindings, otherwise `ELSE`
/// with the bindings unchanged.
pub(crate) fn eval_unify(call: SpecialCall<'_>) -> Action {
    require_args!(call, "unify", 4);
    let left = call.bindings.apply_to(&call.args[0]);
    let right = call.bindings.apply_to(&call.args[1]);
    let mut extended = call.bindings.clone();
    if unify_into(&left, &right, &mut extended) {
        let then = extended.apply_to(&call.args[2]);
        Action::Push(Branch::eval(then, call.ctx.deeper(), call.cont, extended))
    } else {
        let otherwise = call.bindings.apply_to(&call.args[3]);
        Action::Push(Branch::eval(otherwise, call.ctx.deeper(), call.cont, call.bindings))
    }
}
