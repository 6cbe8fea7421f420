//! Error types for parsing, configuration and evaluation.
//!
//! Pattern-match failure is never an error: it is an empty result set.
//! Failures of grounded operations are reported in-band as
//! `(Error <expr> "<message>")` atoms (see `backend::grounded::ExecError`).
//! `MettaError` covers the failures that abort a whole form.

use crate::backend::models::Atom;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MettaError {
    /// Malformed source text.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// A query ran past the evaluation depth bound.
    #[error("evaluation depth limit of {limit} exceeded while evaluating {atom}")]
    DepthLimitExceeded { limit: usize, atom: Atom },

    /// Invalid configuration or token registration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a source or configuration file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MettaError {
    fn from(err: std::io::Error) -> Self {
        MettaError::Io(err.to_string())
    }
}

impl From<regex::Error> for MettaError {
    fn from(err: regex::Error) -> Self {
        MettaError::Config(err.to_string())
    }
}
