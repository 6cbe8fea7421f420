//! Pattern matching operations on spaces.
//!
//! `(match SPACE PATTERN TEMPLATE)` searches the space for atoms unifying
//! with the pattern. Each result instantiates the template, which is then
//! evaluated in the caller's space: the target space only answers the query,
//! its rules never take part in rewriting the template.

use tracing::debug;

use crate::backend::environment::Environment;
use crate::backend::models::{Atom, Bindings};

use super::super::trampoline::{push_frame, Action, Branch, Cont, Ctx, Frame, SpecialCall};
use super::helpers::not_a_space;

/// Evaluate match: (match <space> <pattern> <template>)
pub(crate) fn eval_match(call: SpecialCall<'_>) -> Action {
    require_three_args!(call, "match");
    let space_arg = call.bindings.apply_to(&call.args[0]);
    let frame = Frame::MatchSpace {
        pattern: call.args[1].clone(),
        template: call.args[2].clone(),
        expr: call.expr.clone(),
        ctx: call.ctx.clone(),
    };
    Action::Push(Branch::eval(
        space_arg,
        call.ctx.clone(),
        push_frame(frame, call.cont),
        call.bindings,
    ))
}

/// Run the query once the space argument is known.
#[allow(clippy::too_many_arguments)]
pub(crate) fn resume_match(
    env: &Environment,
    pattern: &Atom,
    template: &Atom,
    expr: &Atom,
    ctx: &Ctx,
    value: Atom,
    next: Cont,
    bindings: Bindings,
) -> Action {
    if value.is_error() {
        return Action::Push(Branch::ret(value, next, bindings));
    }
    let Some(space) = env.resolve_space(&value) else {
        let message = not_a_space("match", &value);
        let err = Atom::error(bindings.apply_to(expr), &message);
        return Action::Push(Branch::ret(err, next, bindings));
    };

    let pattern = bindings.apply_to(pattern);
    debug!(
        target: "mettaspace::backend::eval::match",
        space = space.id(),
        %pattern,
        "match"
    );
    let template = template.clone();
    let ctx = ctx.deeper();
    let results = space.query(&pattern).filter_map(move |found| {
        let merged = bindings.merge(&found)?;
        let instance = merged.apply_to(&template);
        Some(Branch::eval(instance, ctx.clone(), next.clone(), merged))
    });
    Action::Fork(Box::new(results))
}
