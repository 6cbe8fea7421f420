//! Interpreter configuration.
//!
//! ## TOML Format (`mettaspace.toml`)
//!
//! ```toml
//! [eval]
//! max-depth = 2000
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::MettaError;

/// Default bound on evaluation depth.
pub const MAX_EVAL_DEPTH: usize = 1000;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Evaluation settings.
    pub eval: EvalConfig,
}

/// Settings for the interpreter loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EvalConfig {
    /// Bound on the rewrites along one branch. Applying a rule, evaluating
    /// the results of a grounded call and continuing a special form with its
    /// body, branch or template each count one; evaluating the children of
    /// an expression counts nothing, so deeply nested data is not limited.
    /// A rewrite chain longer than the bound, terminating or not, aborts the
    /// query with `MettaError::DepthLimitExceeded`.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: MAX_EVAL_DEPTH,
        }
    }
}

impl Config {
    pub fn parse_toml(content: &str) -> Result<Self, MettaError> {
        let config: Config = toml::from_str(content).map_err(|e| MettaError::Config(e.to_string()))?;
        if config.eval.max_depth == 0 {
            return Err(MettaError::Config("eval.max-depth must be positive".to_string()));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, MettaError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MettaError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse_toml(&content)
    }
}
