//! Interned identifiers for cities, companies and flight codes.

use std::collections::HashMap;
use std::fmt;

/// A small integer standing in for an interned string.
///
/// Symbols are opaque, totally ordered and cheap to copy. The engine never
/// looks at the underlying text; only the [`Interner`] that produced a symbol
/// can turn it back into a string.
///
/// # Examples
///
/// ```
/// use flight_planner::domain::{Interner, Symbol};
///
/// let mut interner = Interner::new();
/// let paris = interner.intern("Paris");
/// assert_eq!(interner.intern("Paris"), paris);
/// assert_eq!(interner.resolve(paris), Some("Paris"));
///
/// // The empty string always maps to the reserved sentinel
/// assert_eq!(interner.intern(""), Symbol::EMPTY);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Reserved symbol for the empty string.
    pub const EMPTY: Symbol = Symbol(u32::MAX);

    /// Build a symbol from its raw value.
    pub const fn from_raw(raw: u32) -> Self {
        Symbol(raw)
    }

    /// Returns the raw integer value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true for the empty-string sentinel.
    pub const fn is_empty(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Symbol(<empty>)")
        } else {
            write!(f, "Symbol({})", self.0)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// String interning service.
///
/// Mapping is stable and injective: the first call for a given string
/// allocates the next symbol, later calls return the same one.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    lookup: HashMap<String, Symbol>,
    names: Vec<String>,
}

impl Interner {
    /// Create an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its symbol.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if name.is_empty() {
            return Symbol::EMPTY;
        }
        if let Some(&symbol) = self.lookup.get(name) {
            return symbol;
        }

        let symbol = Symbol(self.names.len() as u32);
        self.names.push(name.to_string());
        self.lookup.insert(name.to_string(), symbol);
        symbol
    }

    /// Look up a previously interned string without allocating a symbol.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        if name.is_empty() {
            return Some(Symbol::EMPTY);
        }
        self.lookup.get(name).copied()
    }

    /// Resolve a symbol back to its string.
    ///
    /// Returns `None` for symbols this interner never produced.
    pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
        if symbol.is_empty() {
            return Some("");
        }
        self.names.get(symbol.0 as usize).map(String::as_str)
    }

    /// Resolve a symbol, falling back to `"?"` for unknown symbols.
    pub fn name(&self, symbol: Symbol) -> &str {
        self.resolve(symbol).unwrap_or("?")
    }

    /// Returns the number of distinct non-empty strings interned.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_stable() {
        let mut interner = Interner::new();
        let a = interner.intern("Paris");
        let b = interner.intern("Rome");
        assert_ne!(a, b);
        assert_eq!(interner.intern("Paris"), a);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn empty_string_is_sentinel() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern(""), Symbol::EMPTY);
        assert!(interner.is_empty());
        assert_eq!(interner.resolve(Symbol::EMPTY), Some(""));
    }

    #[test]
    fn resolve_unknown() {
        let interner = Interner::new();
        assert_eq!(interner.resolve(Symbol::from_raw(7)), None);
        assert_eq!(interner.name(Symbol::from_raw(7)), "?");
    }

    #[test]
    fn get_does_not_allocate() {
        let mut interner = Interner::new();
        assert_eq!(interner.get("Oslo"), None);
        let oslo = interner.intern("Oslo");
        assert_eq!(interner.get("Oslo"), Some(oslo));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Symbol::from_raw(3)), "Symbol(3)");
        assert_eq!(format!("{:?}", Symbol::EMPTY), "Symbol(<empty>)");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(Symbol::from_raw(1) < Symbol::from_raw(2));
        assert!(Symbol::from_raw(2) < Symbol::EMPTY);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: intern then resolve returns the original
        #[test]
        fn roundtrip(names in proptest::collection::vec("[A-Za-z]{1,8}", 1..20)) {
            let mut interner = Interner::new();
            let symbols: Vec<Symbol> = names.iter().map(|n| interner.intern(n)).collect();
            for (name, symbol) in names.iter().zip(&symbols) {
                prop_assert_eq!(interner.resolve(*symbol), Some(name.as_str()));
            }
        }

        /// Distinct strings never share a symbol
        #[test]
        fn injective(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
            let mut interner = Interner::new();
            let sa = interner.intern(&a);
            let sb = interner.intern(&b);
            prop_assert_eq!(sa == sb, a == b);
        }
    }
}
