//! Variable bindings produced by unification
//!
//! Bindings are stored as a flat list of `(variable, value)` pairs in a
//! `SmallVec`, which keeps the common case (a handful of variables per rule)
//! on the stack. Values may themselves mention bound variables; `walk`,
//! `resolve` and `apply_to` follow those chains. The occurs check in
//! `pattern::unify_into` guarantees the chains never loop.

use std::fmt;

use smallvec::SmallVec;

use super::{Atom, VariableAtom};

#[derive(Clone, Default, PartialEq)]
pub struct Bindings {
    entries: SmallVec<[(VariableAtom, Atom); 8]>,
}

impl Bindings {
    #[inline]
    pub fn new() -> Self {
        Bindings {
            entries: SmallVec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableAtom, &Atom)> {
        self.entries.iter().map(|(var, value)| (var, value))
    }

    /// Direct assignment of `var`, without following chains.
    #[inline]
    pub fn get(&self, var: &VariableAtom) -> Option<&Atom> {
        self.entries
            .iter()
            .find(|(bound, _)| bound == var)
            .map(|(_, value)| value)
    }

    /// Record `var = value` with no consistency checks.
    /// Callers must have checked that `var` is unbound and does not occur in `value`.
    #[inline]
    pub(crate) fn bind_unchecked(&mut self, var: VariableAtom, value: Atom) {
        self.entries.push((var, value));
    }

    /// Follow variable-to-variable chains at the top of `atom`.
    pub fn walk<'a>(&'a self, atom: &'a Atom) -> &'a Atom {
        let mut current = atom;
        while let Atom::Variable(var) = current {
            match self.get(var) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Does `var` occur in `atom` once bindings are followed?
    pub fn occurs(&self, var: &VariableAtom, atom: &Atom) -> bool {
        match self.walk(atom) {
            Atom::Variable(other) => other == var,
            Atom::Expression(items) => items.iter().any(|item| self.occurs(var, item)),
            _ => false,
        }
    }

    /// Fully substituted value of `var`, or `None` if it is unbound.
    pub fn resolve(&self, var: &VariableAtom) -> Option<Atom> {
        let value = self.get(var)?;
        let resolved = self.apply_to(value);
        match &resolved {
            Atom::Variable(free) if free == var => None,
            _ => Some(resolved),
        }
    }

    /// Replace every bound variable in `atom` by its resolved value.
    pub fn apply_to(&self, atom: &Atom) -> Atom {
        if self.is_empty() {
            return atom.clone();
        }
        match self.walk(atom) {
            Atom::Expression(items) => {
                Atom::Expression(items.iter().map(|item| self.apply_to(item)).collect())
            }
            other => other.clone(),
        }
    }

    /// Keep only the given variables, with their values fully resolved.
    pub fn narrow_vars(&self, vars: &[VariableAtom]) -> Bindings {
        let mut narrowed = Bindings::new();
        for var in vars {
            if let Some(value) = self.resolve(var) {
                narrowed.bind_unchecked(var.clone(), value);
            }
        }
        narrowed
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, (var, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", var, value)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
