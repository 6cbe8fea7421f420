//! Lazy space queries.
//!
//! `SpaceHandle::query` scans a snapshot of the atom list in insertion
//! order. Every stored atom is renamed fresh before it is unified with the
//! pattern, so variables in facts never alias variables in the query. A
//! conjunction `(, P1 P2 ... Pn)` is a left-to-right join over the same
//! snapshot.

use std::sync::Arc;

use tracing::debug;

use crate::backend::models::{Atom, Bindings, SpaceHandle};

use super::super::pattern::unify_into;

/// Head symbol of conjunctive patterns.
pub const CONJUNCTION_SYMBOL: &str = ",";

type BindingsIter = Box<dyn Iterator<Item = Bindings> + Send>;

/// Lazy stream of query results, each narrowed to the pattern's variables.
pub struct QueryIter {
    inner: BindingsIter,
}

impl Iterator for QueryIter {
    type Item = Bindings;

    fn next(&mut self) -> Option<Bindings> {
        self.inner.next()
    }
}

impl SpaceHandle {
    /// Every way `pattern` unifies with atoms in this space.
    pub fn query(&self, pattern: &Atom) -> QueryIter {
        self.query_with(pattern, Bindings::new())
    }

    /// Query under bindings already established by the caller. Results are
    /// the caller's bindings extended by the match, narrowed to the pattern's
    /// variables.
    pub fn query_with(&self, pattern: &Atom, bindings: Bindings) -> QueryIter {
        let snapshot = self.snapshot();
        debug!(
            target: "mettaspace::backend::space::query",
            space = self.id(),
            atoms = snapshot.len(),
            %pattern,
            "query"
        );
        let vars = pattern.vars();
        let clauses: Arc<[Atom]> = conjunction_clauses(pattern)
            .map(|clauses| clauses.to_vec())
            .unwrap_or_else(|| vec![pattern.clone()])
            .into();
        let results = join(snapshot, clauses, 0, bindings);
        QueryIter {
            inner: Box::new(results.map(move |b| b.narrow_vars(&vars))),
        }
    }

    /// `query` followed by instantiating `template` with each result.
    pub fn subst(&self, pattern: &Atom, template: &Atom) -> Vec<Atom> {
        self.query(pattern).map(|b| b.apply_to(template)).collect()
    }
}

/// Clauses of a `(, P1 ... Pn)` pattern.
pub fn conjunction_clauses(pattern: &Atom) -> Option<&[Atom]> {
    match pattern {
        Atom::Expression(items) if pattern.head_symbol() == Some(CONJUNCTION_SYMBOL) => {
            Some(&items[1..])
        }
        _ => None,
    }
}

fn join(
    snapshot: Arc<Vec<Atom>>,
    clauses: Arc<[Atom]>,
    index: usize,
    bindings: Bindings,
) -> BindingsIter {
    if index == clauses.len() {
        return Box::new(std::iter::once(bindings));
    }
    let clause = bindings.apply_to(&clauses[index]);
    let matches = match_clause(Arc::clone(&snapshot), clause, bindings);
    Box::new(matches.flat_map(move |b| join(Arc::clone(&snapshot), Arc::clone(&clauses), index + 1, b)))
}

fn match_clause(
    snapshot: Arc<Vec<Atom>>,
    clause: Atom,
    bindings: Bindings,
) -> impl Iterator<Item = Bindings> + Send {
    (0..snapshot.len()).filter_map(move |i| {
        let fact = snapshot[i].make_vars_unique();
        let mut candidate = bindings.clone();
        if unify_into(&clause, &fact, &mut candidate) {
            Some(candidate)
        } else {
            None
        }
    })
}
