use std::sync::Arc;

use tracing::debug;

use super::config::EvalConfig;
use super::grounded::{operation_atom, GroundedOperation, GroundedRegistry};
use super::models::{Atom, SpaceHandle};
use super::tokenizer::{TokenConstructor, Tokenizer};
use crate::error::MettaError;

/// Surface name of the runner's own space.
pub const SELF_SPACE_TOKEN: &str = "&self";

/// The environment of one runner: its space, its token table and its
/// evaluation settings.
///
/// Cloning is cheap: the space is shared (clones see the same atoms) and
/// the token table is copy-on-write, so registering a token on a clone does
/// not affect the original. There is no process-wide registry: two
/// environments never observe each other's spaces or tokens unless a space
/// handle is registered in both.
#[derive(Clone)]
pub struct Environment {
    space: SpaceHandle,
    tokenizer: Arc<Tokenizer>,
    config: EvalConfig,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self::with_space(SpaceHandle::new(SELF_SPACE_TOKEN), config)
    }

    /// Environment over an existing space. The default tokens are
    /// registered, with `&self` bound to `space`.
    pub fn with_space(space: SpaceHandle, config: EvalConfig) -> Self {
        let mut env = Environment {
            space,
            tokenizer: Arc::new(Tokenizer::new()),
            config,
        };
        env.register_defaults();
        env
    }

    fn register_defaults(&mut self) {
        for op in GroundedRegistry::with_standard_ops().operations() {
            self.register_operation(op);
        }
        self.register_atom("True", Atom::boolean(true));
        self.register_atom("False", Atom::boolean(false));
        self.register_atom(SELF_SPACE_TOKEN, Atom::space(self.space.clone()));
    }

    pub fn space(&self) -> &SpaceHandle {
        &self.space
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    /// The grounded atom wrapping this environment's space.
    pub fn self_atom(&self) -> Atom {
        Atom::space(self.space.clone())
    }

    /// Map the exact word `name` to `atom` for subsequent parsing and for
    /// `match` receiving the bare symbol.
    pub fn register_atom(&mut self, name: &str, atom: Atom) {
        debug!(target: "mettaspace::backend::environment", name, %atom, "register atom");
        Arc::make_mut(&mut self.tokenizer).register_atom(name, atom);
    }

    /// Map every word matching `regex` to the atom built by `constructor`.
    pub fn register_token<F>(&mut self, regex: &str, constructor: F) -> Result<(), MettaError>
    where
        F: Fn(&str) -> Atom + Send + Sync + 'static,
    {
        debug!(target: "mettaspace::backend::environment", regex, "register token");
        let constructor: TokenConstructor = Arc::new(constructor);
        Arc::make_mut(&mut self.tokenizer).register_token(regex, constructor)?;
        Ok(())
    }

    /// Make a grounded operation callable under its own name.
    pub fn register_operation(&mut self, op: Arc<dyn GroundedOperation>) {
        let name = op.name().to_string();
        self.register_atom(&name, operation_atom(op));
    }

    /// Resolve a word through the token table.
    pub fn resolve_token(&self, word: &str) -> Option<Atom> {
        self.tokenizer.find_token(word)
    }

    /// Space designated by `atom`: a grounded space, or a symbol whose token
    /// resolves to one.
    pub fn resolve_space(&self, atom: &Atom) -> Option<SpaceHandle> {
        match atom {
            Atom::Grounded(_) => atom.as_space().cloned(),
            Atom::Symbol(name) => self
                .resolve_token(name.as_str())
                .and_then(|resolved| resolved.as_space().cloned()),
            _ => None,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tokens() {
        let env = Environment::new();
        assert_eq!(env.resolve_token("True"), Some(Atom::boolean(true)));
        assert_eq!(env.resolve_token("+").map(|a| a.to_string()), Some("+".to_string()));
        assert_eq!(env.resolve_token("&self"), Some(env.self_atom()));
        assert_eq!(env.resolve_token("stone"), None);
    }

    #[test]
    fn test_resolve_space() {
        let mut env = Environment::new();
        let kb = SpaceHandle::new("kb");
        env.register_atom("&kb", Atom::space(kb.clone()));
        assert_eq!(env.resolve_space(&Atom::sym("&kb")), Some(kb.clone()));
        assert_eq!(env.resolve_space(&Atom::space(kb.clone())), Some(kb));
        assert_eq!(env.resolve_space(&Atom::sym("&nope")), None);
        assert_eq!(env.resolve_space(&Atom::long(1)), None);
        assert!(env.resolve_space(&Atom::sym("&self")).unwrap().same_space(env.space()));
    }

    #[test]
    fn test_clone_shares_space_but_not_tokens() {
        let env = Environment::new();
        let mut other = env.clone();
        other.register_atom("&kb", Atom::long(1));
        other.space().add(Atom::sym("fact"));
        assert!(env.space().contains(&Atom::sym("fact")));
        assert_eq!(env.resolve_token("&kb"), None);
        assert_eq!(other.resolve_token("&kb"), Some(Atom::long(1)));
    }

    #[test]
    fn test_register_token_error() {
        let mut env = Environment::new();
        assert!(matches!(env.register_token("[", |_| Atom::unit()), Err(MettaError::Config(_))));
    }

    #[test]
    fn test_separate_environments_are_isolated() {
        let a = Environment::new();
        let b = Environment::new();
        a.space().add(Atom::sym("only-in-a"));
        assert!(!b.space().contains(&Atom::sym("only-in-a")));
        assert_ne!(a.self_atom(), b.self_atom());
    }
}
