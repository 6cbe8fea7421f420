//! Arithmetic operations.
//!
//! - `AddOp` - Addition (+)
//! - `SubOp` - Subtraction (-)
//! - `MulOp` - Multiplication (*)
//! - `DivOp` - Division (/)
//! - `ModOp` - Modulo (%)
//!
//! Integer arithmetic is checked; mixing an integer with a float promotes to float.

use super::{
    check_arity, friendly_type_name, reject_unbound, Atom, ExecError, GroundedOperation,
    GroundedResult,
};
use crate::backend::models::Grounded;

enum Number {
    Long(i64),
    Float(f64),
}

fn as_number(op: &str, atom: &Atom) -> Result<Number, ExecError> {
    match atom {
        Atom::Grounded(Grounded::Long(n)) => Ok(Number::Long(*n)),
        Atom::Grounded(Grounded::Float(x)) => Ok(Number::Float(*x)),
        other => Err(ExecError::IncorrectArgument(format!(
            "Cannot perform '{}': expected Number, got {}",
            op,
            friendly_type_name(other)
        ))),
    }
}

/// Shared driver: arity, unbound check, number extraction, then either the
/// checked integer op or the float op.
fn eval_binary(
    op: &str,
    args: &[Atom],
    int_op: impl Fn(i64, i64) -> Result<i64, ExecError>,
    float_op: impl Fn(f64, f64) -> Result<f64, ExecError>,
) -> GroundedResult {
    check_arity(op, args, 2)?;
    reject_unbound(args)?;
    let a = as_number(op, &args[0])?;
    let b = as_number(op, &args[1])?;
    let result = match (a, b) {
        (Number::Long(x), Number::Long(y)) => Atom::long(int_op(x, y)?),
        (Number::Float(x), Number::Float(y)) => Atom::float(float_op(x, y)?),
        (Number::Long(x), Number::Float(y)) => Atom::float(float_op(x as f64, y)?),
        (Number::Float(x), Number::Long(y)) => Atom::float(float_op(x, y as f64)?),
    };
    Ok(vec![result])
}

fn overflow(op: &str, x: i64, y: i64) -> ExecError {
    ExecError::Arithmetic(format!("Integer overflow: {} {} {}", x, op, y))
}

/// Addition operation: (+ a b)
pub struct AddOp;

impl GroundedOperation for AddOp {
    fn name(&self) -> &str {
        "+"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_binary(
            "+",
            args,
            |x, y| x.checked_add(y).ok_or_else(|| overflow("+", x, y)),
            |x, y| Ok(x + y),
        )
    }
}

/// Subtraction operation: (- a b)
pub struct SubOp;

impl GroundedOperation for SubOp {
    fn name(&self) -> &str {
        "-"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_binary(
            "-",
            args,
            |x, y| x.checked_sub(y).ok_or_else(|| overflow("-", x, y)),
            |x, y| Ok(x - y),
        )
    }
}

/// Multiplication operation: (* a b)
pub struct MulOp;

impl GroundedOperation for MulOp {
    fn name(&self) -> &str {
        "*"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_binary(
            "*",
            args,
            |x, y| x.checked_mul(y).ok_or_else(|| overflow("*", x, y)),
            |x, y| Ok(x * y),
        )
    }
}

/// Division operation: (/ a b)
pub struct DivOp;

impl GroundedOperation for DivOp {
    fn name(&self) -> &str {
        "/"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_binary(
            "/",
            args,
            |x, y| {
                if y == 0 {
                    Err(ExecError::Arithmetic("Division by zero".to_string()))
                } else {
                    x.checked_div(y).ok_or_else(|| overflow("/", x, y))
                }
            },
            |x, y| {
                if y == 0.0 {
                    Err(ExecError::Arithmetic("Division by zero".to_string()))
                } else {
                    Ok(x / y)
                }
            },
        )
    }
}

/// Modulo operation: (% a b)
pub struct ModOp;

impl GroundedOperation for ModOp {
    fn name(&self) -> &str {
        "%"
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        eval_binary(
            "%",
            args,
            |x, y| {
                if y == 0 {
                    Err(ExecError::Arithmetic("Modulo by zero".to_string()))
                } else {
                    x.checked_rem(y).ok_or_else(|| overflow("%", x, y))
                }
            },
            |x, y| {
                if y == 0.0 {
                    Err(ExecError::Arithmetic("Modulo by zero".to_string()))
                } else {
                    Ok(x % y)
                }
            },
        )
    }
}
