use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use log::{debug, warn};

use crate::catalog::{IndexPath, Symbol};
use crate::errors::{Error, Result};
use crate::events::{ChangeNotifier, FavoriteEvent, Subscription};
use crate::favorites::{FavoriteCollection, FavoriteKey, FavoriteStoreTrait};

#[derive(Default)]
struct FavoritesState {
    favorites: FavoriteCollection,
    // Set when a symbol was added elsewhere; events carry no key, so the
    // new entry cannot be placed until the next reload.
    stale: bool,
}

impl FavoritesState {
    fn apply(&mut self, event: &FavoriteEvent) {
        match event {
            FavoriteEvent::FavoriteAdded { .. } => self.stale = true,
            FavoriteEvent::FavoriteRemoved { symbol } => {
                for symbols in self.favorites.values_mut() {
                    symbols.retain(|s| s.name != symbol.name);
                }
                self.favorites.retain(|_, symbols| !symbols.is_empty());
            }
        }
    }
}

/// Favorites list: one section per category holding favorites, sorted by
/// category name.
pub struct FavoritesViewModel {
    state: Arc<RwLock<FavoritesState>>,
    store: Arc<dyn FavoriteStoreTrait>,
    _subscription: Subscription,
}

impl FavoritesViewModel {
    /// Starts empty and listening; call [`reload`](Self::reload) to fill it.
    pub fn new(store: Arc<dyn FavoriteStoreTrait>, notifier: &ChangeNotifier) -> Self {
        let state = Arc::new(RwLock::new(FavoritesState::default()));

        let weak = Arc::downgrade(&state);
        let subscription = notifier.subscribe(move |event| {
            if let Some(state) = weak.upgrade() {
                state
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .apply(event);
            }
        });

        Self {
            state,
            store,
            _subscription: subscription,
        }
    }

    /// Replaces the held favorites with a fresh store snapshot.
    pub async fn reload(&self) -> Result<()> {
        let favorites = self.store.get_all().await?;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Favorites reloaded with {} sections", favorites.len());
        state.favorites = favorites;
        state.stale = false;
        Ok(())
    }

    /// True when a favorite was added since the last reload.
    pub fn needs_reload(&self) -> bool {
        self.read().stale
    }

    pub fn favorites(&self) -> FavoriteCollection {
        self.read().favorites.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.read().favorites.is_empty()
    }

    pub fn sections(&self) -> Vec<FavoriteKey> {
        self.read().favorites.keys().cloned().collect()
    }

    pub fn section_count(&self) -> usize {
        self.read().favorites.len()
    }

    pub fn item_count(&self, section: usize) -> usize {
        self.read()
            .favorites
            .values()
            .nth(section)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn section_item(&self, section: usize) -> Option<FavoriteKey> {
        self.read().favorites.keys().nth(section).cloned()
    }

    pub fn cell_item(&self, index_path: IndexPath) -> Option<(FavoriteKey, Symbol)> {
        let state = self.read();
        let (key, symbols) = state.favorites.iter().nth(index_path.section)?;
        let symbol = symbols.get(index_path.item)?;
        Some((key.clone(), symbol.clone()))
    }

    /// Deletes the favorites at `index_paths` in one batch.
    ///
    /// Every path must resolve, otherwise nothing is deleted. The list is
    /// reloaded after a successful batch; after a failed one it keeps its
    /// state apart from removals the store already announced.
    pub async fn delete_favorites(&self, index_paths: &[IndexPath]) -> Result<()> {
        let batch = self.collect_batch(index_paths)?;
        if batch.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.store.delete_batch(&batch).await {
            warn!("Deleting {} favorites failed: {}", index_paths.len(), e);
            return Err(e);
        }
        self.reload().await
    }

    fn collect_batch(&self, index_paths: &[IndexPath]) -> Result<FavoriteCollection> {
        let unique: BTreeSet<IndexPath> = index_paths.iter().copied().collect();
        let mut batch = FavoriteCollection::new();

        for index_path in unique {
            let (key, symbol) = self
                .cell_item(index_path)
                .ok_or(Error::InvalidIndexPath(index_path))?;
            batch.entry(key).or_default().push(symbol);
        }
        Ok(batch)
    }

    fn read(&self) -> RwLockReadGuard<'_, FavoritesState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}
