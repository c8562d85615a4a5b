use async_trait::async_trait;
use futures::future::join_all;
use log::warn;

use crate::catalog::Symbol;
use crate::errors::{AggregateBatchError, Error, Result};
use crate::favorites::favorites_model::{FavoriteCollection, FavoriteKey};

/// Trait for favorite store operations.
///
/// Every operation is asynchronous so a persistent or remote backing can be
/// substituted without touching callers. Backings emit `FavoriteAdded` /
/// `FavoriteRemoved` events after successful mutations.
#[async_trait]
pub trait FavoriteStoreTrait: Send + Sync {
    /// Appends `symbol` under `key`. Callers must not save the same pair twice.
    async fn save(&self, key: &FavoriteKey, symbol: &Symbol) -> Result<()>;

    /// Removes every symbol under `key` named like `symbol`.
    ///
    /// Succeeds without effect when nothing matches.
    async fn delete(&self, key: &FavoriteKey, symbol: &Symbol) -> Result<()>;

    /// Snapshot of all favorites.
    async fn get_all(&self) -> Result<FavoriteCollection>;

    /// Deletes every pair in `favorites`, best effort.
    ///
    /// Keys are processed concurrently, symbols under one key in order. All
    /// deletions are attempted; if any failed the call returns
    /// [`Error::Batch`] and the successful deletions stay applied.
    async fn delete_batch(&self, favorites: &FavoriteCollection) -> Result<()> {
        let deletions = favorites.iter().map(|(key, symbols)| async move {
            let mut errors = Vec::new();
            for symbol in symbols {
                if let Err(e) = self.delete(key, symbol).await {
                    warn!(
                        "Failed to delete favorite {} from {}: {}",
                        symbol.name, key.category_name, e
                    );
                    errors.push(e);
                }
            }
            errors
        });

        let errors: Vec<Error> = join_all(deletions).await.into_iter().flatten().collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateBatchError::from_errors(errors).into())
        }
    }
}
