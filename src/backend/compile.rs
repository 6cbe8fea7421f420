// Compile: surface text → atoms
//
// Parsing yields untyped s-expressions; this module turns them into atoms
// through a token table:
// - `$name` becomes a variable
// - a word matching a registered token becomes the token's atom
// - any other word becomes a symbol
// - string and numeric literals become grounded atoms

use crate::error::MettaError;
use crate::sexpr::{Parser, SExpr};

use super::models::{Atom, VariableAtom};
use super::tokenizer::Tokenizer;

/// A top-level form converted to an atom.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledForm {
    /// `!FORM`: evaluate and report results
    pub is_query: bool,
    pub atom: Atom,
}

/// Incremental compiler: parses and converts one form at a time, so the
/// token table can change between forms.
pub struct FormReader {
    parser: Parser,
}

impl FormReader {
    pub fn new(src: &str) -> Self {
        FormReader {
            parser: Parser::new(src),
        }
    }

    /// Next form converted with `tokenizer`, or `None` at end of input.
    pub fn next_form(&mut self, tokenizer: &Tokenizer) -> Result<Option<CompiledForm>, MettaError> {
        Ok(self.parser.next_form()?.map(|form| CompiledForm {
            is_query: form.is_query,
            atom: sexpr_to_atom(&form.sexpr, tokenizer),
        }))
    }
}

/// Compile every form of `src`. Query markers are kept in `CompiledForm`.
pub fn compile(src: &str, tokenizer: &Tokenizer) -> Result<Vec<CompiledForm>, MettaError> {
    let mut reader = FormReader::new(src);
    let mut forms = Vec::new();
    while let Some(form) = reader.next_form(tokenizer)? {
        forms.push(form);
    }
    Ok(forms)
}

/// Convert an s-expression to an atom.
pub fn sexpr_to_atom(sexpr: &SExpr, tokenizer: &Tokenizer) -> Atom {
    match sexpr {
        SExpr::Word(word) => word_to_atom(word, tokenizer),
        SExpr::String(s) => Atom::string(s),
        SExpr::Integer(n) => Atom::long(*n),
        SExpr::Float(x) => Atom::float(*x),
        SExpr::List(items) => Atom::expr(items.iter().map(|item| sexpr_to_atom(item, tokenizer)).collect()),
    }
}

fn word_to_atom(word: &str, tokenizer: &Tokenizer) -> Atom {
    match word.strip_prefix('$') {
        Some(name) if !name.is_empty() => variable(name),
        _ => tokenizer.find_token(word).unwrap_or_else(|| Atom::sym(word)),
    }
}

/// `name` or `name#id`; an id must be a positive integer.
fn variable(name: &str) -> Atom {
    let renamed = name.rsplit_once('#').and_then(|(base, id)| {
        let id = id.parse::<u64>().ok().filter(|id| *id > 0)?;
        (!base.is_empty()).then(|| VariableAtom::with_id(base, id))
    });
    Atom::Variable(renamed.unwrap_or_else(|| VariableAtom::new(name)))
}
