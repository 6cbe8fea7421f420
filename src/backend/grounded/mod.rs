//! Grounded operations: native callables embedded as atoms.
//!
//! A grounded operation sits in head position of an expression, e.g.
//! `(+ 2 3)`. The interpreter reduces the arguments first, then calls
//! `execute` once per combination of argument results. The operation
//! returns zero or more result atoms, which are evaluated further.
//!
//! # Outcomes
//!
//! - `Ok(results)`: one branch per result atom
//! - `Err(ExecError::NoReduce)`: the expression is already a normal form
//!   (for instance `(+ $x 1)` with `$x` unbound)
//! - any other `Err`: the branch yields `(Error <expr> "<message>")`

mod arithmetic;
mod comparison;
mod logical;
mod traits;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::models::{Atom, Grounded};

pub use arithmetic::{AddOp, DivOp, ModOp, MulOp, SubOp};
pub use comparison::{EqualOp, GreaterEqOp, GreaterOp, LessEqOp, LessOp, NotEqualOp};
pub use logical::{AndOp, NotOp, OrOp};
pub use traits::{FnOperation, GroundedOperation};

/// Result type for grounded operations
pub type GroundedResult = Result<Vec<Atom>, ExecError>;

/// Error type for grounded operation execution
#[derive(Debug, Clone, PartialEq)]
pub enum ExecError {
    /// Operation is not applicable to these arguments.
    /// This is NOT an error: the expression stays as it is.
    NoReduce,

    /// Runtime error during execution
    Runtime(String),

    /// Arithmetic error (division by zero, overflow, etc.)
    Arithmetic(String),

    /// Incorrect argument type or arity
    IncorrectArgument(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::NoReduce => write!(f, "NoReduce"),
            ExecError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            ExecError::Arithmetic(msg) => write!(f, "Arithmetic error: {}", msg),
            ExecError::IncorrectArgument(msg) => write!(f, "Incorrect argument: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {}

/// Helper function to get a friendly type name for error messages
pub(crate) fn friendly_type_name(atom: &Atom) -> &'static str {
    match atom {
        Atom::Symbol(_) => "Symbol",
        Atom::Variable(_) => "Variable",
        Atom::Expression(_) => "Expression",
        Atom::Grounded(g) => g.kind(),
    }
}

/// Arity check shared by the built-in operations.
pub(crate) fn check_arity(op: &str, args: &[Atom], expected: usize) -> Result<(), ExecError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ExecError::IncorrectArgument(format!(
            "{} requires {} argument{}, got {}",
            op,
            expected,
            if expected == 1 { "" } else { "s" },
            args.len()
        )))
    }
}

/// Unbound variables among the arguments leave the call unreduced.
pub(crate) fn reject_unbound(args: &[Atom]) -> Result<(), ExecError> {
    if args.iter().any(|a| matches!(a, Atom::Variable(_))) {
        Err(ExecError::NoReduce)
    } else {
        Ok(())
    }
}

/// Wrap an operation as an atom.
pub fn operation_atom(op: Arc<dyn GroundedOperation>) -> Atom {
    Atom::Grounded(Grounded::Operation(op))
}

/// Registry of grounded operations, keyed by name
#[derive(Clone, Default)]
pub struct GroundedRegistry {
    operations: HashMap<String, Arc<dyn GroundedOperation>>,
}

impl GroundedRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        GroundedRegistry {
            operations: HashMap::new(),
        }
    }

    /// Create a registry with standard operations (+, -, *, /, comparisons, logical)
    pub fn with_standard_ops() -> Self {
        let mut registry = Self::new();

        // Arithmetic operations
        registry.register(Arc::new(AddOp));
        registry.register(Arc::new(SubOp));
        registry.register(Arc::new(MulOp));
        registry.register(Arc::new(DivOp));
        registry.register(Arc::new(ModOp));

        // Comparison operations
        registry.register(Arc::new(LessOp));
        registry.register(Arc::new(LessEqOp));
        registry.register(Arc::new(GreaterOp));
        registry.register(Arc::new(GreaterEqOp));
        registry.register(Arc::new(EqualOp));
        registry.register(Arc::new(NotEqualOp));

        // Logical operations
        registry.register(Arc::new(AndOp));
        registry.register(Arc::new(OrOp));
        registry.register(Arc::new(NotOp));

        registry
    }

    /// Register a grounded operation
    pub fn register(&mut self, op: Arc<dyn GroundedOperation>) {
        self.operations.insert(op.name().to_string(), op);
    }

    /// Look up a grounded operation by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn GroundedOperation>> {
        self.operations.get(name).cloned()
    }

    /// All registered operations, sorted by name.
    pub fn operations(&self) -> Vec<Arc<dyn GroundedOperation>> {
        let mut ops: Vec<_> = self.operations.values().cloned().collect();
        ops.sort_by(|a, b| a.name().cmp(b.name()));
        ops
    }
}
