//! Trampoline-based Iterative Evaluation
//!
//! This module provides the core data structures and engine for evaluation
//! using an explicit work stack instead of recursive function calls.
//! Deeply nested expressions and long rewrite chains never grow the host
//! stack; the evaluation depth bound is enforced per branch instead.

mod engine;
mod types;

pub use engine::Interpreter;
pub(crate) use engine::SpecialCall;
pub(crate) use types::{push_frame, Action, Branch, Cont, Ctx, Frame, SpaceOpKind};
