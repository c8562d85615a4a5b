//! Catalog domain models.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

pub type CategoryName = String;
pub type SymbolName = String;

/// A single favoritable symbol.
///
/// Identity is the name alone. `is_favorite` is a display cache filled in by
/// view models; the favorite store is the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol {
    pub name: SymbolName,
    pub is_favorite: bool,
}

impl Symbol {
    pub fn new(name: impl Into<SymbolName>) -> Self {
        Self {
            name: name.into(),
            is_favorite: false,
        }
    }

    /// Returns a copy carrying the given favorite flag.
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        Self {
            name: self.name.clone(),
            is_favorite,
        }
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// The catalog file lists symbols as bare strings.
impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.name
    }
}

/// A named group of symbols, displayed as one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub icon_name: String,
    pub name: CategoryName,
    pub symbols: Vec<Symbol>,
}

impl Category {
    pub fn new(
        icon_name: impl Into<String>,
        name: impl Into<CategoryName>,
        symbols: Vec<Symbol>,
    ) -> Self {
        Self {
            icon_name: icon_name.into(),
            name: name.into(),
            symbols,
        }
    }

    pub fn favorite_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_favorite).count()
    }
}

/// Section/item address of a cell in a sectioned list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {} item {}", self.section, self.item)
    }
}
