//! The atom model: symbols, variables, expressions and grounded values.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::grounded::GroundedOperation;
use crate::backend::symbol::{intern, Symbol};

use super::SpaceHandle;

/// Head symbol of error atoms: `(Error <atom> "<message>")`
pub const ERROR_SYMBOL: &str = "Error";

/// Source of fresh variable identities. Identity 0 is reserved for variables
/// read from source text.
static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(1);

/// A variable: a name plus the identity of the context that introduced it.
///
/// `$x` parsed from text has id 0. Every rule instantiation and every fact
/// returned by a query renames its variables with fresh ids, so the same
/// surface name in two instantiations never aliases.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VariableAtom {
    name: Symbol,
    id: u64,
}

impl VariableAtom {
    pub fn new(name: &str) -> Self {
        VariableAtom {
            name: intern(name),
            id: 0,
        }
    }

    /// A variable with a known identity, as printed in a result (`$x#12`).
    pub fn with_id(name: &str, id: u64) -> Self {
        VariableAtom { name: intern(name), id }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Same name, new identity.
    pub fn make_unique(&self) -> Self {
        VariableAtom {
            name: self.name.clone(),
            id: NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// `$name` for parsed variables, `$name#id` for renamed ones. The parser
/// reads `$name#id` back as the same variable.
impl fmt::Display for VariableAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == 0 {
            write!(f, "${}", self.name)
        } else {
            write!(f, "${}#{}", self.name, self.id)
        }
    }
}

impl fmt::Debug for VariableAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Opaque payload of a grounded atom.
///
/// Equality never decomposes the payload: numbers and strings compare by
/// value, spaces by pointer identity, operations by name.
#[derive(Clone)]
pub enum Grounded {
    Long(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Space(SpaceHandle),
    Operation(Arc<dyn GroundedOperation>),
}

impl Grounded {
    /// Name of the payload kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Grounded::Long(_) => "Number (integer)",
            Grounded::Float(_) => "Number (float)",
            Grounded::Bool(_) => "Bool",
            Grounded::String(_) => "String",
            Grounded::Space(_) => "Space",
            Grounded::Operation(_) => "Operation",
        }
    }
}

impl PartialEq for Grounded {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Grounded::Long(a), Grounded::Long(b)) => a == b,
            (Grounded::Float(a), Grounded::Float(b)) => a == b,
            (Grounded::Bool(a), Grounded::Bool(b)) => a == b,
            (Grounded::String(a), Grounded::String(b)) => a == b,
            (Grounded::Space(a), Grounded::Space(b)) => a.same_space(b),
            (Grounded::Operation(a), Grounded::Operation(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Display for Grounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grounded::Long(n) => write!(f, "{}", n),
            Grounded::Float(x) => write!(f, "{:?}", x),
            Grounded::Bool(true) => f.write_str("True"),
            Grounded::Bool(false) => f.write_str("False"),
            Grounded::String(s) => write!(f, "{:?}", s),
            Grounded::Space(space) => write!(f, "GroundingSpace-{}", space.id()),
            Grounded::Operation(op) => f.write_str(op.name()),
        }
    }
}

impl fmt::Debug for Grounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grounded::Space(space) => write!(f, "{:?}", space),
            other => write!(f, "Grounded({})", other),
        }
    }
}

/// A term of the rewriting language.
#[derive(Clone, PartialEq)]
pub enum Atom {
    Symbol(Symbol),
    Variable(VariableAtom),
    Expression(Vec<Atom>),
    Grounded(Grounded),
}

impl Atom {
    pub fn sym(name: &str) -> Self {
        Atom::Symbol(intern(name))
    }

    pub fn var(name: &str) -> Self {
        Atom::Variable(VariableAtom::new(name))
    }

    pub fn expr(children: Vec<Atom>) -> Self {
        Atom::Expression(children)
    }

    pub fn gnd(value: Grounded) -> Self {
        Atom::Grounded(value)
    }

    pub fn long(n: i64) -> Self {
        Atom::Grounded(Grounded::Long(n))
    }

    pub fn float(x: f64) -> Self {
        Atom::Grounded(Grounded::Float(x))
    }

    pub fn boolean(b: bool) -> Self {
        Atom::Grounded(Grounded::Bool(b))
    }

    pub fn string(s: &str) -> Self {
        Atom::Grounded(Grounded::String(s.to_string()))
    }

    pub fn space(handle: SpaceHandle) -> Self {
        Atom::Grounded(Grounded::Space(handle))
    }

    /// The empty expression `()`, returned by side-effecting forms.
    pub fn unit() -> Self {
        Atom::Expression(Vec::new())
    }

    /// `(Error <atom> "<message>")`
    pub fn error(atom: Atom, message: &str) -> Self {
        Atom::Expression(vec![Atom::sym(ERROR_SYMBOL), atom, Atom::string(message)])
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Atom::Expression(items)
            if matches!(items.first(), Some(Atom::Symbol(head)) if *head == ERROR_SYMBOL))
    }

    pub fn children(&self) -> Option<&[Atom]> {
        match self {
            Atom::Expression(items) => Some(items),
            _ => None,
        }
    }

    /// Head symbol of an expression, e.g. `how-get` for `(how-get stick)`.
    pub fn head_symbol(&self) -> Option<&str> {
        match self {
            Atom::Expression(items) => match items.first() {
                Some(Atom::Symbol(head)) => Some(head.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_space(&self) -> Option<&SpaceHandle> {
        match self {
            Atom::Grounded(Grounded::Space(space)) => Some(space),
            _ => None,
        }
    }

    /// Distinct variables in left-to-right order of first occurrence.
    pub fn vars(&self) -> Vec<VariableAtom> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut Vec<VariableAtom>) {
        match self {
            Atom::Variable(v) => {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
            Atom::Expression(items) => items.iter().for_each(|item| item.collect_vars(out)),
            _ => {}
        }
    }

    pub fn has_vars(&self) -> bool {
        match self {
            Atom::Variable(_) => true,
            Atom::Expression(items) => items.iter().any(Atom::has_vars),
            _ => false,
        }
    }

    /// Rename every variable to a fresh identity, consistently across the atom.
    pub fn make_vars_unique(&self) -> Atom {
        if !self.has_vars() {
            return self.clone();
        }
        let mut renaming = HashMap::new();
        self.rename_vars(&mut renaming)
    }

    fn rename_vars(&self, renaming: &mut HashMap<VariableAtom, VariableAtom>) -> Atom {
        match self {
            Atom::Variable(v) => Atom::Variable(
                renaming
                    .entry(v.clone())
                    .or_insert_with(|| v.make_unique())
                    .clone(),
            ),
            Atom::Expression(items) => {
                Atom::Expression(items.iter().map(|item| item.rename_vars(renaming)).collect())
            }
            other => other.clone(),
        }
    }
}

/// Equality up to a consistent bijective renaming of variables.
pub fn atoms_are_equivalent(left: &Atom, right: &Atom) -> bool {
    let mut forward = HashMap::new();
    let mut backward = HashMap::new();
    equivalent_impl(left, right, &mut forward, &mut backward)
}

fn equivalent_impl<'a>(
    left: &'a Atom,
    right: &'a Atom,
    forward: &mut HashMap<&'a VariableAtom, &'a VariableAtom>,
    backward: &mut HashMap<&'a VariableAtom, &'a VariableAtom>,
) -> bool {
    match (left, right) {
        (Atom::Variable(l), Atom::Variable(r)) => {
            let fwd = *forward.entry(l).or_insert(r);
            let bwd = *backward.entry(r).or_insert(l);
            fwd == r && bwd == l
        }
        (Atom::Expression(l), Atom::Expression(r)) => {
            l.len() == r.len()
                && l.iter()
                    .zip(r.iter())
                    .all(|(a, b)| equivalent_impl(a, b, forward, backward))
        }
        (Atom::Symbol(l), Atom::Symbol(r)) => l == r,
        (Atom::Grounded(l), Atom::Grounded(r)) => l == r,
        _ => false,
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(s) => write!(f, "{}", s),
            Atom::Variable(v) => write!(f, "{}", v),
            Atom::Grounded(g) => write!(f, "{}", g),
            Atom::Expression(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<&str> for Atom {
    fn from(name: &str) -> Self {
        Atom::sym(name)
    }
}

impl From<i64> for Atom {
    fn from(n: i64) -> Self {
        Atom::long(n)
    }
}
