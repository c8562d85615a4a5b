use log::debug;
use serde::Deserialize;

use super::catalog_model::Category;
use super::catalog_traits::CatalogSource;
use crate::errors::{Error, Result};

/// Top-level shape of the catalog data file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
}

/// Immutable in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<Category>,
}

impl StaticCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parses the catalog data format: `{"categories": [{"iconName", "name", "symbols"}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| Error::Catalog(e.to_string()))?;
        debug!("Parsed catalog with {} categories", file.categories.len());
        Ok(Self::new(file.categories))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.categories.iter().map(|c| c.symbols.len()).sum()
    }
}

impl CatalogSource for StaticCatalog {
    fn load_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}
