use crate::catalog::catalog_model::Category;
use crate::errors::Result;

/// Read-once source of the static symbol catalog.
pub trait CatalogSource: Send + Sync {
    /// Returns every category in display order.
    fn load_categories(&self) -> Result<Vec<Category>>;
}
