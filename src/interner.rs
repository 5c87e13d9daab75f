use once_cell::sync::Lazy;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static INTERNER: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

/// A name that has been interned in the global string interner.
///
/// Interning makes symbol comparison and hashing a single integer operation,
/// which keeps `SymbolMap` lookups cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternedSymbol(DefaultSymbol);

impl InternedSymbol {
    /// Intern a string and return its handle
    pub fn new(s: &str) -> Self {
        let mut interner = INTERNER.write().unwrap_or_else(PoisonError::into_inner);
        InternedSymbol(interner.get_or_intern(s))
    }

    /// Resolve the handle back to an owned string
    pub fn resolve(&self) -> String {
        self.with_str(str::to_string)
    }

    /// Run a function with the interned string slice, avoiding an allocation
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = INTERNER.read().unwrap_or_else(PoisonError::into_inner);
        // Handles only come from `new`, so resolution cannot miss.
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| write!(f, "{s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string_returns_same_symbol() {
        assert_eq!(InternedSymbol::new("LAMBDA"), InternedSymbol::new("LAMBDA"));
    }

    #[test]
    fn test_intern_is_case_sensitive() {
        assert_ne!(InternedSymbol::new("quote"), InternedSymbol::new("QUOTE"));
    }

    #[test]
    fn test_resolve_and_display() {
        let sym = InternedSymbol::new("HELLO-WORLD");
        assert_eq!(sym.resolve(), "HELLO-WORLD");
        assert_eq!(format!("{sym}"), "HELLO-WORLD");
        assert_eq!(sym.with_str(str::len), 11);
    }
}
