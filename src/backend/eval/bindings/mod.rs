//! Variable binding forms:
//! - let: bind a pattern to each result of an initializer
//! - let*: sequential bindings, desugared to nested `let`
//! - unify: explicit unification with success/failure branches

mod let_forms;
mod unify;

pub(crate) use let_forms::{eval_let, eval_let_star, resume_let};
pub(crate) use unify::eval_unify;
