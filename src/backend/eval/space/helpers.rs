use crate::backend::models::Atom;

/// Error message for a space argument that resolved to something else.
pub(super) fn not_a_space(op: &str, value: &Atom) -> String {
    match value {
        Atom::Symbol(name) if name.as_str().starts_with('&') => {
            format!("{}: unknown space {}", op, name)
        }
        other => format!("{}: expected a space, got {}", op, other),
    }
}
