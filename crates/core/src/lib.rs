//! Symbols Core - favorite-state synchronization for a categorized symbol catalog.
//!
//! This crate holds the favorite store contract and its in-memory backing,
//! the change notifier that keeps independently built views consistent, the
//! reconciliation algorithms, and headless view models for the screens.

pub mod catalog;
pub mod constants;
pub mod errors;
pub mod events;
pub mod favorites;
pub mod reconcile;
pub mod views;

// Re-export the types most callers need
pub use catalog::{CatalogSource, Category, IndexPath, StaticCatalog, Symbol};
pub use events::{ChangeNotifier, FavoriteEvent, FavoriteEventSink, Subscription};
pub use favorites::{
    FavoriteCollection, FavoriteKey, FavoriteStoreTrait, InMemoryFavoriteStore, StoreConfig,
};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
