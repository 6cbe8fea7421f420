pub mod atom;
pub mod bindings;
pub mod space_handle;

pub use atom::{atoms_are_equivalent, Atom, Grounded, VariableAtom, ERROR_SYMBOL};
pub use bindings::Bindings;
pub use space_handle::SpaceHandle;

/// Head symbol of equality rules.
pub const RULE_SYMBOL: &str = "=";

/// Represents a rewrite rule: (= lhs rhs)
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub lhs: Atom,
    pub rhs: Atom,
}

impl Rule {
    pub fn new(lhs: Atom, rhs: Atom) -> Self {
        Rule { lhs, rhs }
    }

    /// Read a rule out of an `(= lhs rhs)` atom.
    pub fn from_atom(atom: &Atom) -> Option<Rule> {
        match atom {
            Atom::Expression(items) if items.len() == 3 => match &items[0] {
                Atom::Symbol(head) if *head == RULE_SYMBOL => {
                    Some(Rule::new(items[1].clone(), items[2].clone()))
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn to_atom(&self) -> Atom {
        Atom::expr(vec![Atom::sym(RULE_SYMBOL), self.lhs.clone(), self.rhs.clone()])
    }

    /// Same rule with every variable renamed fresh, consistently across both sides.
    pub fn make_vars_unique(&self) -> Rule {
        match self.to_atom().make_vars_unique() {
            Atom::Expression(mut items) if items.len() == 3 => {
                let rhs = items.pop().unwrap_or_else(Atom::unit);
                let lhs = items.pop().unwrap_or_else(Atom::unit);
                Rule::new(lhs, rhs)
            }
            _ => self.clone(),
        }
    }
}
