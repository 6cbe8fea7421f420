/// mettaspace - MeTTa term-rewriting interpreter
///
/// This library provides a MeTTa evaluator over atom spaces: atoms are
/// stored in named spaces, queried by unification, and evaluated by
/// applying `(= LHS RHS)` rules until a normal form is reached. Evaluation
/// is non-deterministic: one query can yield several results.
///
/// # Architecture
///
/// 1. **Lexical Analysis & S-expression Parsing** (`sexpr` module)
///    - Tokenizes input text into structured tokens
///    - Parses tokens into S-expressions, one top-level form at a time
///    - Handles `;` comments and the `!` query marker
///
/// 2. **Backend Evaluation** (`backend` module)
///    - Converts S-expressions to atoms through a per-runner token table
///    - Unifies atoms and queries spaces lazily, conjunctions included
///    - Evaluates with an explicit work stack, yielding results lazily
///    - Grounded atoms wrap numbers, strings, operations and space handles
///
/// # Example
///
/// ```rust
/// use mettaspace::backend::*;
///
/// let mut metta = Metta::new();
/// let results = metta.run(
///     r#"
///     (= (color) red)
///     (= (color) green)
///     !(color)
/// "#,
/// );
///
/// assert_eq!(results[0], Ok(vec![Atom::sym("red"), Atom::sym("green")]));
/// ```
///
/// # MeTTa Language Features
///
/// - **Rules**: `(= pattern body)`, stored in the space like any other atom
/// - **Queries**: `!(expr)` evaluates and reports every result
/// - **Matching**: `(match &space pattern template)`, with `(, p1 p2 ...)` conjunctions
/// - **Binding**: `let`, `let*`, `unify`
/// - **Control Flow**: `(if cond then else)`, `quote`
/// - **Non-determinism**: `superpose`, `collapse`
/// - **Spaces**: `new-space`, `add-atom`, `remove-atom`, `get-atoms`
/// - **Grounded Functions**: arithmetic, comparisons and logic
///
/// # Evaluation Strategy
///
/// - **Depth-first, lazy**: later branches are explored only when asked for
/// - **Deterministic order**: facts in insertion order, children left to right
/// - **Bounded**: exceeding the depth limit aborts the query with an error
pub mod backend;
pub mod error;
pub mod repl;
pub mod sexpr;

pub use backend::{
    eval, interpret,
    models::{Atom, Bindings, Grounded, SpaceHandle, VariableAtom},
    runner::Metta,
    Environment,
};
pub use error::MettaError;
pub use sexpr::{Lexer, Parser, SExpr, Token};
