//! Comparison operations.
//!
//! - `LessOp`, `LessEqOp` - Less than / less than or equal
//! - `GreaterOp`, `GreaterEqOp` - Greater than / greater than or equal
//! - `EqualOp`, `NotEqualOp` - Equality / inequality
//!
//! Ordering comparisons accept numbers and strings. Equality accepts any
//! atoms and compares them structurally.

use std::cmp::Ordering;

use super::{
    check_arity, friendly_type_name, reject_unbound, Atom, ExecError, GroundedOperation,
    GroundedResult,
};
use crate::backend::models::Grounded;

#[derive(Clone, Copy)]
enum CompareKind {
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl CompareKind {
    fn symbol(self) -> &'static str {
        match self {
            CompareKind::Less => "<",
            CompareKind::LessEq => "<=",
            CompareKind::Greater => ">",
            CompareKind::GreaterEq => ">=",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareKind::Less => ordering == Ordering::Less,
            CompareKind::LessEq => ordering != Ordering::Greater,
            CompareKind::Greater => ordering == Ordering::Greater,
            CompareKind::GreaterEq => ordering != Ordering::Less,
        }
    }
}

fn eval_comparison(args: &[Atom], kind: CompareKind) -> GroundedResult {
    let op = kind.symbol();
    check_arity(op, args, 2)?;
    reject_unbound(args)?;
    let ordering = match (&args[0], &args[1]) {
        (Atom::Grounded(a), Atom::Grounded(b)) => match (a, b) {
            (Grounded::Long(x), Grounded::Long(y)) => Some(x.cmp(y)),
            (Grounded::Float(x), Grounded::Float(y)) => x.partial_cmp(y),
            (Grounded::Long(x), Grounded::Float(y)) => (*x as f64).partial_cmp(y),
            (Grounded::Float(x), Grounded::Long(y)) => x.partial_cmp(&(*y as f64)),
            (Grounded::String(x), Grounded::String(y)) => Some(x.cmp(y)),
            _ => {
                return Err(ExecError::IncorrectArgument(format!(
                    "Cannot compare {} with {} using '{}'",
                    a.kind(),
                    b.kind(),
                    op
                )))
            }
        },
        (a, b) => {
            let offending = if matches!(a, Atom::Grounded(_)) { b } else { a };
            return Err(ExecError::IncorrectArgument(format!(
                "Cannot perform '{}': expected Number or String, got {}",
                op,
                friendly_type_name(offending)
            )));
        }
    };
    // NaN compares false under every ordering
    let result = ordering.map(|o| kind.holds(o)).unwrap_or(false);
    Ok(vec![Atom::boolean(result)])
}

/// Less than operation: (< a b)
pub struct LessOp;

impl GroundedOperation for LessOp {
    fn name(&self) -> &str {
        "<"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_comparison(args, CompareKind::Less)
    }
}

/// Less than or equal operation: (<= a b)
pub struct LessEqOp;

impl GroundedOperation for LessEqOp {
    fn name(&self) -> &str {
        "<="
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_comparison(args, CompareKind::LessEq)
    }
}

/// Greater than operation: (> a b)
pub struct GreaterOp;

impl GroundedOperation for GreaterOp {
    fn name(&self) -> &str {
        ">"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_comparison(args, CompareKind::Greater)
    }
}

/// Greater than or equal operation: (>= a b)
pub struct GreaterEqOp;

impl GroundedOperation for GreaterEqOp {
    fn name(&self) -> &str {
        ">="
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_comparison(args, CompareKind::GreaterEq)
    }
}

/// Equality operation: (== a b)
pub struct EqualOp;

impl GroundedOperation for EqualOp {
    fn name(&self) -> &str {
        "=="
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        check_arity("==", args, 2)?;
        reject_unbound(args)?;
        Ok(vec![Atom::boolean(args[0] == args[1])])
    }
}

/// Inequality operation: (!= a b)
pub struct NotEqualOp;

impl GroundedOperation for NotEqualOp {
    fn name(&self) -> &str {
        "!="
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        check_arity("!=", args, 2)?;
        reject_unbound(args)?;
        Ok(vec![Atom::boolean(args[0] != args[1])])
    }
}
