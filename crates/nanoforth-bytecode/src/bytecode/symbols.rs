//! Label symbol table.

use indexmap::IndexMap;

/// Label name to resolved address, in definition order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Symbols {
    by_name: IndexMap<String, u32>,
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous address if the name was already bound.
    pub fn insert(&mut self, name: impl Into<String>, addr: u32) -> Option<u32> {
        self.by_name.insert(name.into(), addr)
    }

    pub fn address_of(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// All labels bound to `addr`, in definition order.
    pub fn names_at(&self, addr: u32) -> impl Iterator<Item = &str> {
        self.by_name
            .iter()
            .filter(move |(_, a)| **a == addr)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.by_name.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Symbols {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut symbols = Symbols::new();
        for (name, addr) in iter {
            symbols.insert(name, addr);
        }
        symbols
    }
}
