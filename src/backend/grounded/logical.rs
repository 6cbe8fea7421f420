//! Logical operations over `True`/`False`.
//!
//! - `AndOp` - Logical AND (and)
//! - `OrOp` - Logical OR (or)
//! - `NotOp` - Logical NOT (not)

use super::{
    check_arity, friendly_type_name, reject_unbound, Atom, ExecError, GroundedOperation,
    GroundedResult,
};
use crate::backend::models::Grounded;

fn as_bool(op: &str, atom: &Atom) -> Result<bool, ExecError> {
    match atom {
        Atom::Grounded(Grounded::Bool(b)) => Ok(*b),
        other => Err(ExecError::IncorrectArgument(format!(
            "Cannot perform '{}': expected Bool, got {}",
            op,
            friendly_type_name(other)
        ))),
    }
}

/// Logical AND operation: (and a b)
pub struct AndOp;

impl GroundedOperation for AndOp {
    fn name(&self) -> &str {
        "and"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        check_arity("and", args, 2)?;
        reject_unbound(args)?;
        let a = as_bool("and", &args[0])?;
        let b = as_bool("and", &args[1])?;
        Ok(vec![Atom::boolean(a && b)])
    }
}

/// Logical OR operation: (or a b)
pub struct OrOp;

impl GroundedOperation for OrOp {
    fn name(&self) -> &str {
        "or"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        check_arity("or", args, 2)?;
        reject_unbound(args)?;
        let a = as_bool("or", &args[0])?;
        let b = as_bool("or", &args[1])?;
        Ok(vec![Atom::boolean(a || b)])
    }
}

/// Logical NOT operation: (not a)
pub struct NotOp;

impl GroundedOperation for NotOp {
    fn name(&self) -> &str {
        "not"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        check_arity("not", args, 1)?;
        reject_unbound(args)?;
        Ok(vec![Atom::boolean(!as_bool("not", &args[0])?)])
    }
}
