//! The `GroundedOperation` trait and a closure adapter.

use std::fmt;

use super::{Atom, GroundedResult};

/// A native operation callable from rewriting code.
///
/// Arguments arrive fully reduced and with the branch bindings applied. The
/// operation must not assume they are ground: a free variable may still be
/// present, in which case returning `ExecError::NoReduce` keeps the
/// expression as a normal form.
///
/// # Implementing a Grounded Operation
///
/// ```
/// use mettaspace::backend::grounded::{ExecError, GroundedOperation, GroundedResult};
/// use mettaspace::backend::models::{Atom, Grounded};
///
/// struct Double;
///
/// impl GroundedOperation for Double {
///     fn name(&self) -> &str {
///         "double"
///     }
///
///     fn execute(&self, args: &[Atom]) -> GroundedResult {
///         match args {
///             [Atom::Grounded(Grounded::Long(n))] => Ok(vec![Atom::long(n * 2)]),
///             _ => Err(ExecError::NoReduce),
///         }
///     }
/// }
///
/// assert_eq!(Double.execute(&[Atom::long(21)]), Ok(vec![Atom::long(42)]));
/// ```
pub trait GroundedOperation: Send + Sync {
    /// The name of this operation (e.g., "+", "-", "and")
    fn name(&self) -> &str;

    /// Execute the operation on reduced arguments.
    fn execute(&self, args: &[Atom]) -> GroundedResult;
}

/// Function type accepted by `FnOperation`.
pub type OperationFn = dyn Fn(&[Atom]) -> GroundedResult + Send + Sync;

/// A grounded operation backed by a closure, for host-registered callables.
pub struct FnOperation {
    name: String,
    func: Box<OperationFn>,
}

impl FnOperation {
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Atom]) -> GroundedResult + Send + Sync + 'static,
    {
        FnOperation {
            name: name.to_string(),
            func: Box::new(func),
        }
    }
}

impl GroundedOperation for FnOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, args: &[Atom]) -> GroundedResult {
        (self.func)(args)
    }
}

impl fmt::Debug for FnOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnOperation({})", self.name)
    }
}
