//! Favorites module - key/collection models, the store trait and its in-memory backing.

mod favorites_model;
mod favorites_traits;
mod in_memory_store;
mod store_config;

#[cfg(test)]
mod favorites_store_tests;

pub use favorites_model::{
    favorite_names, insert_favorite, remove_favorite, FavoriteCollection, FavoriteKey,
};
pub use favorites_traits::FavoriteStoreTrait;
pub use in_memory_store::InMemoryFavoriteStore;
pub use store_config::StoreConfig;
