// Backend module for MeTTa evaluation
//
// - `compile`: MeTTa text → atoms, through the runner's token table
// - `eval`: lazy non-deterministic evaluation over a space
// - `runner`: the `Metta` form loop tying the two together

pub mod compile;
pub mod config;
pub mod environment;
pub mod eval;
pub mod grounded;
pub mod models;
pub mod runner;
pub mod symbol;
pub mod tokenizer;

pub use compile::{compile, sexpr_to_atom, CompiledForm};
pub use config::{Config, EvalConfig};
pub use environment::Environment;
pub use eval::{eval, interpret, unify, Interpreter};
pub use grounded::{ExecError, GroundedOperation, GroundedRegistry, GroundedResult};
pub use models::*;
pub use runner::Metta;
pub use symbol::{intern, intern_string, Symbol};
pub use tokenizer::Tokenizer;
