//! Headless view models for the categories grid, the favorites list and the
//! symbol detail screen.
//!
//! Each view model keeps its own denormalized copy of what its screen shows
//! and stays in sync through the [`ChangeNotifier`](crate::events::ChangeNotifier).
//! Flags only change after the store confirms an operation or an event
//! arrives. Dropping a view model unregisters it.

mod categories_view_model;
mod favorites_view_model;
mod symbol_detail_view_model;


pub use categories_view_model::CategoriesViewModel;
pub use favorites_view_model::FavoritesViewModel;
pub use symbol_detail_view_model::SymbolDetailViewModel;
