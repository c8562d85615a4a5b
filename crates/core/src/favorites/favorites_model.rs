//! Favorites domain models.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, CategoryName, Symbol};

/// Identifies the category a favorite belongs to.
///
/// Equality, hashing and ordering use `category_name` only; `icon_name` is
/// display metadata for section headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteKey {
    pub icon_name: String,
    pub category_name: CategoryName,
}

impl FavoriteKey {
    pub fn new(icon_name: impl Into<String>, category_name: impl Into<CategoryName>) -> Self {
        Self {
            icon_name: icon_name.into(),
            category_name: category_name.into(),
        }
    }

    /// Header-only category used to render a favorites section.
    pub fn to_category(&self) -> Category {
        Category::new(self.icon_name.clone(), self.category_name.clone(), Vec::new())
    }
}

impl From<&Category> for FavoriteKey {
    fn from(category: &Category) -> Self {
        Self::new(category.icon_name.clone(), category.name.clone())
    }
}

impl PartialEq for FavoriteKey {
    fn eq(&self, other: &Self) -> bool {
        self.category_name == other.category_name
    }
}

impl Eq for FavoriteKey {}

impl Hash for FavoriteKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category_name.hash(state);
    }
}

impl PartialOrd for FavoriteKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FavoriteKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category_name.cmp(&other.category_name)
    }
}

/// Favorited symbols grouped by category, iterated in category-name order.
///
/// A present key always maps to a non-empty list kept in insertion order.
pub type FavoriteCollection = BTreeMap<FavoriteKey, Vec<Symbol>>;

/// Appends `symbol` under `key`, creating the entry if needed.
pub fn insert_favorite(favorites: &mut FavoriteCollection, key: &FavoriteKey, symbol: Symbol) {
    favorites.entry(key.clone()).or_default().push(symbol);
}

/// Removes every symbol named like `symbol` under `key`.
///
/// Drops the key when its list becomes empty. Returns whether anything was removed.
pub fn remove_favorite(
    favorites: &mut FavoriteCollection,
    key: &FavoriteKey,
    symbol: &Symbol,
) -> bool {
    let Some(symbols) = favorites.get_mut(key) else {
        return false;
    };

    let before = symbols.len();
    symbols.retain(|s| s.name != symbol.name);
    let removed = symbols.len() != before;

    if symbols.is_empty() {
        favorites.remove(key);
    }
    removed
}

/// Names favorited under the category called `category_name`.
pub fn favorite_names<'a>(
    favorites: &'a FavoriteCollection,
    category_name: &'a str,
) -> impl Iterator<Item = &'a str> {
    favorites
        .iter()
        .filter(move |(key, _)| key.category_name == category_name)
        .flat_map(|(_, symbols)| symbols.iter().map(|s| s.name.as_str()))
}
