//! The `Metta` runner: a space, a token table and the top-level form loop.
//!
//! Bare forms (rules included) are added to the runner's space, `!` forms are
//! evaluated. Forms are read one at a time, so a form sees every fact and
//! token registered by the forms before it. A failure belongs to the form
//! that caused it: a malformed form or a query past the depth bound is
//! reported in that form's slot and the run goes on with the next form.

use tracing::debug;

use crate::error::MettaError;

use super::compile::{compile, CompiledForm, FormReader};
use super::config::EvalConfig;
use super::environment::Environment;
use super::eval::eval;
use super::models::{Atom, SpaceHandle};

/// A MeTTa runner owning one environment.
///
/// # Example
///
/// ```rust
/// use mettaspace::backend::runner::Metta;
///
/// let mut metta = Metta::new();
/// let results = metta.run("(= (double $x) (* $x 2)) !(double 21)");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].as_ref().unwrap()[0].to_string(), "42");
/// ```
#[derive(Clone, Default)]
pub struct Metta {
    env: Environment,
}

impl Metta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Metta {
            env: Environment::with_config(config),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The runner's own space (`&self`).
    pub fn space(&self) -> &SpaceHandle {
        self.env.space()
    }

    pub fn self_atom(&self) -> Atom {
        self.env.self_atom()
    }

    /// Replace the word `name` by `atom` in subsequently parsed forms.
    pub fn register_atom(&mut self, name: &str, atom: Atom) {
        self.env.register_atom(name, atom);
    }

    /// Replace every word matching `regex` by the atom `constructor` builds.
    pub fn register_token<F>(&mut self, regex: &str, constructor: F) -> Result<(), MettaError>
    where
        F: Fn(&str) -> Atom + Send + Sync + 'static,
    {
        self.env.register_token(regex, constructor)
    }

    /// Add an atom to the runner's space.
    pub fn add(&self, atom: Atom) {
        self.env.space().add(atom);
    }

    /// Parse `src` into atoms without touching the space. Query markers are
    /// dropped.
    pub fn parse_all(&self, src: &str) -> Result<Vec<Atom>, MettaError> {
        Ok(compile(src, self.env.tokenizer())?
            .into_iter()
            .map(|form| form.atom)
            .collect())
    }

    /// Run a program: one entry per `!` form and per malformed form, in
    /// source order. Every well-formed form is processed whatever happened
    /// to the forms before it.
    pub fn run(&mut self, src: &str) -> Vec<Result<Vec<Atom>, MettaError>> {
        self.run_forms(src).collect()
    }

    /// Run a program lazily, yielding the outcome of each `!` form and the
    /// error of each malformed form.
    pub fn run_forms<'a>(&'a self, src: &str) -> RunForms<'a> {
        RunForms {
            metta: self,
            reader: FormReader::new(src),
        }
    }

    /// Evaluate one atom in the runner's space.
    pub fn evaluate_atom(&self, atom: Atom) -> Result<Vec<Atom>, MettaError> {
        debug!(target: "mettaspace::backend::runner", %atom, "evaluate");
        eval(atom, &self.env)
    }

    fn execute(&self, form: CompiledForm) -> Option<Result<Vec<Atom>, MettaError>> {
        if form.is_query {
            return Some(self.evaluate_atom(form.atom));
        }
        debug!(target: "mettaspace::backend::runner", atom = %form.atom, "add");
        self.add(form.atom);
        None
    }
}

/// Iterator returned by [`Metta::run_forms`].
pub struct RunForms<'a> {
    metta: &'a Metta,
    reader: FormReader,
}

impl Iterator for RunForms<'_> {
    type Item = Result<Vec<Atom>, MettaError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.next_form(self.metta.env.tokenizer()) {
                Ok(Some(form)) => {
                    if let Some(results) = self.metta.execute(form) {
                        return Some(results);
                    }
                }
                Ok(None) => return None,
                Err(err) => {
                    debug!(target: "mettaspace::backend::runner", %err, "parse failed");
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Run `src` and unwrap every query's results.
#[cfg(test)]
pub(crate) fn run_ok(metta: &mut Metta, src: &str) -> Vec<Vec<Atom>> {
    metta
        .run(src)
        .into_iter()
        .map(|outcome| outcome.unwrap())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(results: &[Atom]) -> Vec<String> {
        results.iter().map(|atom| atom.to_string()).collect()
    }

    #[test]
    fn test_facts_and_queries() {
        let mut metta = Metta::new();
        let results = run_ok(
            &mut metta,
            r#"
                (parent Tom Bob)
                (parent Bob Ann)
                !(match &self (parent $x Bob) $x)
                !(match &self (parent Bob $y) $y)
            "#,
        );
        assert_eq!(results.len(), 2);
        assert_eq!(strings(&results[0]), vec!["Tom"]);
        assert_eq!(strings(&results[1]), vec!["Ann"]);
        assert_eq!(metta.space().atom_count(), 2);
    }

    #[test]
    fn test_rules_are_facts() {
        let mut metta = Metta::new();
        run_ok(&mut metta, "(= (f) a)");
        let results = run_ok(&mut metta, "!(match &self (= (f) $r) $r)");
        assert_eq!(strings(&results[0]), vec!["a"]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut metta = Metta::new();
        let results = run_ok(&mut metta, "!(match &self (missing $x) $x)");
        assert_eq!(results, vec![Vec::<Atom>::new()]);
    }

    #[test]
    fn test_facts_before_parse_error_remain() {
        let mut metta = Metta::new();
        let outcomes = metta.run("(kept 1) !(kept $x) (broken");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(strings(outcomes[0].as_ref().unwrap()), vec!["(kept $x)"]);
        assert!(matches!(outcomes[1], Err(MettaError::Parse { .. })));
        assert!(metta.space().contains(&Atom::expr(vec![Atom::sym("kept"), Atom::long(1)])));
    }

    #[test]
    fn test_forms_after_parse_error_still_run() {
        let mut metta = Metta::new();
        let outcomes = metta.run("!(a) ) (fact 1) (bad (x !y)) !(match &self (fact $n) $n)");
        assert_eq!(outcomes.len(), 4);
        assert_eq!(strings(outcomes[0].as_ref().unwrap()), vec!["(a)"]);
        assert!(matches!(outcomes[1], Err(MettaError::Parse { line: 1, column: 6, .. })));
        assert!(matches!(outcomes[2], Err(MettaError::Parse { .. })));
        assert_eq!(strings(outcomes[3].as_ref().unwrap()), vec!["1"]);
        assert_eq!(metta.space().atom_count(), 1);
    }

    #[test]
    fn test_run_forms_scopes_depth_errors() {
        let metta = Metta::with_config(EvalConfig { max_depth: 50 });
        let outcomes: Vec<_> = metta
            .run_forms("(= (loop) (loop)) !(loop) !(+ 1 2)")
            .collect();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], Err(MettaError::DepthLimitExceeded { limit: 50, .. })));
        assert_eq!(strings(outcomes[1].as_ref().unwrap()), vec!["3"]);
    }

    #[test]
    fn test_run_continues_after_failed_query() {
        let mut metta = Metta::with_config(EvalConfig { max_depth: 50 });
        let outcomes = metta.run("(= (loop) (loop)) !(+ 2 2) !(loop) (after) !(+ 1 2)");
        assert_eq!(outcomes.len(), 3);
        assert_eq!(strings(outcomes[0].as_ref().unwrap()), vec!["4"]);
        assert!(matches!(outcomes[1], Err(MettaError::DepthLimitExceeded { limit: 50, .. })));
        assert_eq!(strings(outcomes[2].as_ref().unwrap()), vec!["3"]);
        assert!(metta.space().contains(&Atom::expr(vec![Atom::sym("after")])));
    }

    #[test]
    fn test_parse_all_does_not_add() {
        let metta = Metta::new();
        let atoms = metta.parse_all("(a $b) !(c)").unwrap();
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].to_string(), "(a $b)");
        assert_eq!(metta.space().atom_count(), 0);
    }

    #[test]
    fn test_register_token() {
        let mut metta = Metta::new();
        metta
            .register_token(r"#\w+", |word| Atom::string(&word[1..]))
            .unwrap();
        let results = run_ok(&mut metta, "!(quote #tag)");
        assert_eq!(
            results[0],
            vec![Atom::expr(vec![Atom::sym("quote"), Atom::string("tag")])]
        );
    }

    #[test]
    fn test_register_space_atom() {
        let mut metta = Metta::new();
        let kb = SpaceHandle::new("kb");
        kb.add(Atom::expr(vec![Atom::sym("color"), Atom::sym("red")]));
        metta.register_atom("&kb", Atom::space(kb));
        let results = run_ok(&mut metta, "!(match &kb (color $c) $c)");
        assert_eq!(strings(&results[0]), vec!["red"]);
    }

    #[test]
    fn test_evaluate_atom() {
        let metta = Metta::new();
        metta.add(Atom::expr(vec![
            Atom::sym("="),
            Atom::sym("answer"),
            Atom::long(42),
        ]));
        assert_eq!(metta.evaluate_atom(Atom::sym("answer")).unwrap(), vec![Atom::long(42)]);
    }
}
