//! Rewriting by `(= LHS RHS)` rules.
//!
//! Rules are ordinary atoms of the branch's space. Each rule is renamed
//! fresh and unified with the expression under the branch bindings; every
//! success opens a branch evaluating the instantiated right-hand side.
//! Matching is lazy: later rules are only tried once the branches of
//! earlier rules are exhausted.

use tracing::trace;

use crate::backend::models::{Atom, Bindings, Rule};

use super::pattern::unify_into;
use super::trampoline::{Action, Branch, Cont, Ctx};

/// Rewrite `expr` by every unifying rule, or return it unchanged when no
/// rule applies.
pub(crate) fn apply_rules(expr: Atom, ctx: Ctx, cont: Cont, bindings: Bindings) -> Action {
    let snapshot = ctx.space.snapshot();
    let query = expr.clone();
    let rhs_ctx = ctx.deeper();
    let rule_cont = cont.clone();
    let rule_bindings = bindings.clone();

    let mut matches = (0..snapshot.len())
        .filter_map(move |i| {
            let rule = Rule::from_atom(&snapshot[i])?.make_vars_unique();
            let mut extended = rule_bindings.clone();
            if !unify_into(&rule.lhs, &query, &mut extended) {
                return None;
            }
            trace!(target: "mettaspace::backend::eval::rules", lhs = %rule.lhs, rhs = %rule.rhs, "rule matched");
            let rhs = extended.apply_to(&rule.rhs);
            Some(Branch::eval(rhs, rhs_ctx.clone(), rule_cont.clone(), extended))
        })
        .peekable();

    if matches.peek().is_none() {
        // no rule applies: already a normal form
        return Action::Push(Branch::ret(expr, cont, bindings));
    }
    Action::Fork(Box::new(matches))
}
