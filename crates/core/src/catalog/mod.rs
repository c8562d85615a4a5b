//! Symbol catalog module - static category/symbol models and the catalog source.

mod catalog_model;
mod catalog_source;
mod catalog_traits;

pub use catalog_model::{Category, CategoryName, IndexPath, Symbol, SymbolName};
pub use catalog_source::StaticCatalog;
pub use catalog_traits::CatalogSource;
