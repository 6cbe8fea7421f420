//! Space operations for evaluation:
//! - Lazy queries and conjunctive joins (`SpaceHandle::query`)
//! - Pattern matching (`match`)
//! - Space management (new-space, add-atom, remove-atom, get-atoms)
//! - Nondeterminism (superpose, collapse)

mod helpers;
mod match_ops;
mod nondeterminism;
pub mod query;
mod space_management;

#[cfg(test)]
mod tests;

pub(crate) use match_ops::{eval_match, resume_match};
pub(crate) use nondeterminism::{eval_collapse, eval_superpose};
pub(crate) use space_management::{
    eval_add_atom, eval_get_atoms, eval_new_space, eval_remove_atom, resume_space_op,
};
