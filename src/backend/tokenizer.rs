//! Token table: maps surface words to atoms.
//!
//! Each entry is either an exact word or a regular expression, paired with a
//! constructor producing the atom that replaces the word at parse time. The
//! most recent matching registration wins, so a runner can shadow a default
//! entry. Words that match no entry become plain symbols.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::trace;

use super::models::Atom;

/// Builds the atom for a matched word.
pub type TokenConstructor = Arc<dyn Fn(&str) -> Atom + Send + Sync>;

#[derive(Clone)]
enum TokenDescr {
    Exact(String),
    Pattern(Regex),
}

impl TokenDescr {
    fn matches(&self, word: &str) -> bool {
        match self {
            TokenDescr::Exact(exact) => exact == word,
            TokenDescr::Pattern(regex) => regex.is_match(word),
        }
    }
}

impl fmt::Display for TokenDescr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenDescr::Exact(word) => write!(f, "{}", word),
            TokenDescr::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

#[derive(Clone, Default)]
pub struct Tokenizer {
    entries: Vec<(TokenDescr, TokenConstructor)>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {
            entries: Vec::new(),
        }
    }

    /// Register a regex-keyed token. The regex must match the whole word,
    /// so it is anchored here.
    pub fn register_token(&mut self, regex: &str, constructor: TokenConstructor) -> Result<(), regex::Error> {
        let anchored = Regex::new(&format!("^(?:{})$", regex))?;
        self.entries.push((TokenDescr::Pattern(anchored), constructor));
        Ok(())
    }

    /// Register a word that always maps to `atom`.
    pub fn register_atom(&mut self, word: &str, atom: Atom) {
        self.entries.push((
            TokenDescr::Exact(word.to_string()),
            Arc::new(move |_| atom.clone()),
        ));
    }

    /// Resolve a word, newest registration first.
    pub fn find_token(&self, word: &str) -> Option<Atom> {
        let (descr, constructor) = self
            .entries
            .iter()
            .rev()
            .find(|(descr, _)| descr.matches(word))?;
        trace!(target: "mettaspace::backend::tokenizer", word, entry = %descr, "token");
        Some(constructor(word))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(descr, _)| descr.to_string()))
            .finish()
    }
}
