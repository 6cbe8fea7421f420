//! Unification of atoms.
//!
//! Two atoms unify when some assignment of their variables makes them
//! structurally equal. The result is the most general such assignment.
//! Unification is symmetric: neither side is privileged as "pattern".

use std::borrow::Cow;

use tracing::trace;

use crate::backend::models::{Atom, Bindings, VariableAtom};

/// Most general bindings unifying `left` and `right`, if any.
///
/// ```
/// use mettaspace::backend::eval::unify;
/// use mettaspace::backend::models::Atom;
///
/// let pattern = Atom::expr(vec![Atom::sym("mine"), Atom::var("x")]);
/// let fact = Atom::expr(vec![Atom::sym("mine"), Atom::sym("stone")]);
/// let bindings = unify(&pattern, &fact).unwrap();
/// assert_eq!(bindings.apply_to(&Atom::var("x")), Atom::sym("stone"));
/// ```
pub fn unify(left: &Atom, right: &Atom) -> Option<Bindings> {
    trace!(target: "mettaspace::backend::eval::unify", %left, %right);
    let mut bindings = Bindings::new();
    if unify_into(left, right, &mut bindings) {
        Some(bindings)
    } else {
        None
    }
}

/// Unify under existing bindings, extending them in place.
///
/// On failure `bindings` may hold a partial extension; callers that need the
/// original must unify into a clone.
pub(crate) fn unify_into(left: &Atom, right: &Atom, bindings: &mut Bindings) -> bool {
    let left = walk_top(left, bindings);
    let right = walk_top(right, bindings);
    match (left.as_ref(), right.as_ref()) {
        (Atom::Variable(a), Atom::Variable(b)) if a == b => true,
        (Atom::Variable(var), other) | (other, Atom::Variable(var)) => {
            bind_var(var, other, bindings)
        }
        (Atom::Symbol(a), Atom::Symbol(b)) => a == b,
        (Atom::Grounded(a), Atom::Grounded(b)) => a == b,
        (Atom::Expression(a), Atom::Expression(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(l, r)| unify_into(l, r, bindings))
        }
        _ => false,
    }
}

/// Resolve a bound variable at the top of `atom`; other atoms are borrowed as-is.
fn walk_top<'a>(atom: &'a Atom, bindings: &Bindings) -> Cow<'a, Atom> {
    match atom {
        Atom::Variable(_) => {
            let walked = bindings.walk(atom);
            if std::ptr::eq(walked, atom) {
                Cow::Borrowed(atom)
            } else {
                Cow::Owned(walked.clone())
            }
        }
        _ => Cow::Borrowed(atom),
    }
}

fn bind_var(var: &VariableAtom, value: &Atom, bindings: &mut Bindings) -> bool {
    if bindings.occurs(var, value) {
        trace!(target: "mettaspace::backend::eval::unify", %var, %value, "occurs check failed");
        return false;
    }
    bindings.bind_unchecked(var.clone(), value.clone());
    true
}

impl Bindings {
    /// Add `var = value`, unifying with any existing assignment of `var`.
    /// Returns false and leaves the bindings unchanged on conflict.
    pub fn add_var_binding(&mut self, var: VariableAtom, value: Atom) -> bool {
        let mut extended = self.clone();
        if unify_into(&Atom::Variable(var), &value, &mut extended) {
            *self = extended;
            true
        } else {
            false
        }
    }

    /// Combine two binding sets. Fails if any assignment of `other` conflicts
    /// with `self`.
    pub fn merge(&self, other: &Bindings) -> Option<Bindings> {
        let mut merged = self.clone();
        for (var, value) in other.iter() {
            if !unify_into(&Atom::Variable(var.clone()), value, &mut merged) {
                return None;
            }
        }
        Some(merged)
    }
}
