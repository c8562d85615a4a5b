use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use log::debug;

use super::SymbolDetailViewModel;
use crate::catalog::{CatalogSource, Category, IndexPath, Symbol};
use crate::errors::{Error, Result};
use crate::events::{ChangeNotifier, Subscription};
use crate::favorites::{FavoriteKey, FavoriteStoreTrait};
use crate::reconcile::{apply_favorite_event, reconcile_all};

/// Categories grid: the whole catalog, one section per category, with
/// favorite flags kept current.
pub struct CategoriesViewModel {
    categories: Arc<RwLock<Vec<Category>>>,
    store: Arc<dyn FavoriteStoreTrait>,
    notifier: ChangeNotifier,
    _subscription: Subscription,
}

impl CategoriesViewModel {
    /// Loads the catalog and starts listening for favorite changes.
    ///
    /// Flags start cleared; call [`reload`](Self::reload) to pull the store's state.
    pub fn new(
        catalog: &dyn CatalogSource,
        store: Arc<dyn FavoriteStoreTrait>,
        notifier: &ChangeNotifier,
    ) -> Result<Self> {
        let categories = Arc::new(RwLock::new(catalog.load_categories()?));

        let weak = Arc::downgrade(&categories);
        let subscription = notifier.subscribe(move |event| {
            if let Some(categories) = weak.upgrade() {
                let mut categories = categories.write().unwrap_or_else(PoisonError::into_inner);
                apply_favorite_event(&mut categories, event);
            }
        });

        Ok(Self {
            categories,
            store,
            notifier: notifier.clone(),
            _subscription: subscription,
        })
    }

    /// Full reconciliation against the store. Returns the number of flags changed.
    ///
    /// On failure the current flags are kept.
    pub async fn reload(&self) -> Result<usize> {
        let favorites = self.store.get_all().await?;
        let mut categories = self
            .categories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let changed = reconcile_all(&mut categories, &favorites);
        debug!("Categories reloaded, {} flags changed", changed);
        Ok(changed)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read().clone()
    }

    pub fn section_count(&self) -> usize {
        self.read().len()
    }

    pub fn item_count(&self, section: usize) -> usize {
        self.read()
            .get(section)
            .map(|c| c.symbols.len())
            .unwrap_or(0)
    }

    pub fn section_item(&self, section: usize) -> Option<Category> {
        self.read().get(section).cloned()
    }

    pub fn cell_item(&self, index_path: IndexPath) -> Option<Symbol> {
        self.read()
            .get(index_path.section)
            .and_then(|c| c.symbols.get(index_path.item))
            .cloned()
    }

    /// Detail screen for the symbol at `index_path`, sharing this view's store
    /// and notifier.
    pub fn detail(&self, index_path: IndexPath) -> Result<SymbolDetailViewModel> {
        let (key, symbol) = {
            let categories = self.read();
            let category = categories
                .get(index_path.section)
                .ok_or(Error::InvalidIndexPath(index_path))?;
            let symbol = category
                .symbols
                .get(index_path.item)
                .ok_or(Error::InvalidIndexPath(index_path))?;
            (FavoriteKey::from(category), symbol.clone())
        };

        Ok(SymbolDetailViewModel::new(
            key,
            symbol,
            Arc::clone(&self.store),
            &self.notifier,
        ))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Category>> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
