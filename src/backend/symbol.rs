//! Symbol names for atoms.
//!
//! With the `symbol-interning` feature a `Symbol` is a 4-byte key into a
//! process-wide `lasso::ThreadedRodeo`, making comparison an integer compare.
//! Without it a `Symbol` wraps an `Arc<str>`, so cloning stays O(1) and the
//! comparison is a string compare.
//!
//! The interner only stores names. It is not a registry of atoms or spaces:
//! two independent runners sharing the same name table never observe each
//! other's facts.
//!
//! ```
//! use mettaspace::backend::symbol::intern;
//!
//! let a = intern("stone");
//! let b = intern("stone");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "stone");
//! ```

use std::fmt;

#[cfg(feature = "symbol-interning")]
mod repr {
    use lasso::{Spur, ThreadedRodeo};
    use std::sync::OnceLock;

    static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();

    #[inline]
    fn interner() -> &'static ThreadedRodeo {
        INTERNER.get_or_init(ThreadedRodeo::new)
    }

    #[derive(Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Symbol(Spur);

    impl Symbol {
        #[inline]
        pub fn new(s: &str) -> Self {
            Symbol(interner().get_or_intern(s))
        }

        #[inline]
        pub fn from_string(s: String) -> Self {
            Symbol(interner().get_or_intern(s))
        }

        #[inline]
        pub fn as_str(&self) -> &str {
            interner().resolve(&self.0)
        }
    }
}

#[cfg(not(feature = "symbol-interning"))]
mod repr {
    use std::sync::Arc;

    #[derive(Clone, Eq, PartialEq, Hash)]
    pub struct Symbol(Arc<str>);

    impl Symbol {
        #[inline]
        pub fn new(s: &str) -> Self {
            Symbol(Arc::from(s))
        }

        #[inline]
        pub fn from_string(s: String) -> Self {
            Symbol(Arc::from(s))
        }

        #[inline]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }
}

pub use repr::Symbol;

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    #[inline]
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    #[inline]
    fn from(s: String) -> Self {
        Symbol::from_string(s)
    }
}

impl AsRef<str> for Symbol {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Intern a name and return its `Symbol`.
#[inline]
pub fn intern(s: &str) -> Symbol {
    Symbol::new(s)
}

/// Intern an owned name without copying when interning is disabled.
#[inline]
pub fn intern_string(s: String) -> Symbol {
    Symbol::from_string(s)
}
