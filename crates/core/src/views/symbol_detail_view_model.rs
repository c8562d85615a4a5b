use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::catalog::Symbol;
use crate::constants::{ADD_TO_FAVORITE_TITLE, REMOVE_FROM_FAVORITE_TITLE};
use crate::errors::Result;
use crate::events::{ChangeNotifier, Subscription};
use crate::favorites::{FavoriteKey, FavoriteStoreTrait};

/// Detail screen for one symbol with an add/remove favorite button.
pub struct SymbolDetailViewModel {
    key: FavoriteKey,
    symbol: Arc<RwLock<Symbol>>,
    store: Arc<dyn FavoriteStoreTrait>,
    _subscription: Subscription,
}

impl SymbolDetailViewModel {
    pub fn new(
        key: FavoriteKey,
        symbol: Symbol,
        store: Arc<dyn FavoriteStoreTrait>,
        notifier: &ChangeNotifier,
    ) -> Self {
        let symbol = Arc::new(RwLock::new(symbol));

        let weak = Arc::downgrade(&symbol);
        let subscription = notifier.subscribe(move |event| {
            let Some(symbol) = weak.upgrade() else {
                return;
            };
            let mut symbol = symbol.write().unwrap_or_else(PoisonError::into_inner);
            if symbol.name == event.symbol().name {
                symbol.is_favorite = event.is_favorite();
            }
        });

        Self {
            key,
            symbol,
            store,
            _subscription: subscription,
        }
    }

    pub fn key(&self) -> &FavoriteKey {
        &self.key
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_favorite(&self) -> bool {
        self.symbol().is_favorite
    }

    pub fn button_title(&self) -> &'static str {
        if self.is_favorite() {
            REMOVE_FROM_FAVORITE_TITLE
        } else {
            ADD_TO_FAVORITE_TITLE
        }
    }

    /// Saves or deletes the symbol depending on its current flag.
    ///
    /// The flag flips only once the store confirms; on failure it is left
    /// as it was. Returns the new flag.
    pub async fn toggle_favorite(&self) -> Result<bool> {
        let symbol = self.symbol();

        if symbol.is_favorite {
            self.store.delete(&self.key, &symbol).await?;
        } else {
            self.store.save(&self.key, &symbol).await?;
        }

        let is_favorite = !symbol.is_favorite;
        self.symbol
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .is_favorite = is_favorite;
        debug!(
            "Toggled {} in {} to favorite={}",
            symbol.name, self.key.category_name, is_favorite
        );
        Ok(is_favorite)
    }
}
