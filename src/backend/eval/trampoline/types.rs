//! Trampoline Types for Iterative Evaluation
//!
//! Evaluation never recurses on the host stack. Every line of exploration is
//! a `Branch`: the step to perform next, the bindings accumulated so far and
//! a continuation saying what to do with the step's result. Continuations
//! are immutable linked frames shared through `Arc`, so forking a branch
//! into alternatives is O(1) and sibling branches never interfere.

use std::fmt;
use std::sync::Arc;

use crate::backend::models::{Atom, Bindings, SpaceHandle};

/// Per-branch evaluation context.
#[derive(Clone)]
pub(crate) struct Ctx {
    /// Space whose `=` rules drive rewriting
    pub space: SpaceHandle,
    /// Rewrites on the way to this branch: a rule, a grounded call or a
    /// special form replacing an atom by another adds one. Evaluating the
    /// children of an expression does not.
    pub depth: usize,
}

impl Ctx {
    pub fn new(space: SpaceHandle) -> Self {
        Ctx { space, depth: 0 }
    }

    /// Context for the atom that replaces the current one.
    #[inline]
    pub fn deeper(&self) -> Ctx {
        Ctx {
            space: self.space.clone(),
            depth: self.depth + 1,
        }
    }
}

/// What a branch does next.
pub(crate) enum Step {
    /// Reduce `atom`
    Eval { atom: Atom, ctx: Ctx },
    /// Hand a finished value to the continuation
    Return(Atom),
}

/// Continuation: `None` means the value is a final result.
pub(crate) type Cont = Option<Arc<ContNode>>;

pub(crate) struct ContNode {
    pub frame: Frame,
    pub next: Cont,
}

/// Push `frame` on top of `next`.
#[inline]
pub(crate) fn push_frame(frame: Frame, next: Cont) -> Cont {
    Some(Arc::new(ContNode { frame, next }))
}

/// Pending work waiting for a sub-result.
pub(crate) enum Frame {
    /// Reducing the children of an expression left to right.
    /// `done` holds the reduced prefix; `next` indexes the first child still
    /// to be reduced after the one in flight.
    Args {
        items: Arc<[Atom]>,
        done: Vec<Atom>,
        next: usize,
        ctx: Ctx,
    },
    /// `let` waiting on the value of its initializer
    LetBody { pattern: Atom, body: Atom, ctx: Ctx },
    /// `match` waiting on its space argument
    MatchSpace {
        pattern: Atom,
        template: Atom,
        expr: Atom,
        ctx: Ctx,
    },
    /// `if` waiting on its condition
    IfBranch {
        then: Atom,
        otherwise: Atom,
        expr: Atom,
        ctx: Ctx,
    },
    /// `add-atom`, `remove-atom` or `get-atoms` waiting on its space argument
    SpaceOp {
        op: SpaceOpKind,
        atom: Option<Atom>,
        expr: Atom,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpaceOpKind {
    Add,
    Remove,
    GetAtoms,
}

/// One line of non-deterministic exploration.
pub(crate) struct Branch {
    pub step: Step,
    pub cont: Cont,
    pub bindings: Bindings,
}

impl Branch {
    #[inline]
    pub fn eval(atom: Atom, ctx: Ctx, cont: Cont, bindings: Bindings) -> Self {
        Branch {
            step: Step::Eval { atom, ctx },
            cont,
            bindings,
        }
    }

    #[inline]
    pub fn ret(atom: Atom, cont: Cont, bindings: Bindings) -> Self {
        Branch {
            step: Step::Return(atom),
            cont,
            bindings,
        }
    }
}

/// Lazy stream of sibling branches.
pub(crate) type Alternatives = Box<dyn Iterator<Item = Branch>>;

/// Entry of the work stack.
pub(crate) enum Work {
    Branch(Branch),
    /// Remaining siblings; the first is taken when this entry is popped and
    /// the rest pushed back, which keeps exploration depth-first.
    Alternatives(Alternatives),
}

/// What a single evaluation step schedules.
pub(crate) enum Action {
    /// Continue with one branch
    Push(Branch),
    /// Continue with a lazy sequence of branches, in order
    Fork(Alternatives),
    /// The branch produced nothing
    Prune,
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Eval { atom, ctx } => write!(f, "Eval({}, depth={})", atom, ctx.depth),
            Step::Return(atom) => write!(f, "Return({})", atom),
        }
    }
}
