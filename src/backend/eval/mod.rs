// Evaluation: non-deterministic rewriting by equality rules
//
// eval(v, env)        = v                       for variables and grounded atoms
// eval(sym, env)      = rewrite(sym)            by (= sym rhs) rules, else sym
// eval((t1 .. tn), env):
//   special forms are dispatched on the head symbol
//   otherwise r_i in eval(t_i) left to right, branch bindings threaded
//   grounded head: results of the native call, evaluated further
//   else rewrite((r1 .. rn)) by every unifying (= lhs rhs) rule

#[macro_use]
mod macros;

mod bindings;
mod control_flow;
pub mod pattern;
mod rules;
pub mod space;
mod trampoline;

#[cfg(test)]
mod eval_tests;

use tracing::debug;

use crate::backend::environment::Environment;
use crate::backend::models::Atom;
use crate::error::MettaError;

pub use pattern::unify;
pub use space::query::{QueryIter, CONJUNCTION_SYMBOL};
pub use trampoline::Interpreter;

/// Lazy evaluation of `atom`: one item per result, in enumeration order.
pub fn interpret(atom: Atom, env: &Environment) -> Interpreter {
    debug!(target: "mettaspace::backend::eval", %atom, "interpret");
    Interpreter::new(atom, env)
}

/// Evaluate `atom` to all of its results.
///
/// An empty vector means the evaluation produced no results, which is not an
/// error. `Err` is returned only when the depth bound was exceeded.
pub fn eval(atom: Atom, env: &Environment) -> Result<Vec<Atom>, MettaError> {
    interpret(atom, env).collect()
}
