use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::sync::{mpsc, oneshot};

use super::favorites_model::{insert_favorite, remove_favorite, FavoriteCollection, FavoriteKey};
use super::favorites_traits::FavoriteStoreTrait;
use super::store_config::StoreConfig;
use crate::catalog::Symbol;
use crate::errors::{Result, StorageError};
use crate::events::{FavoriteEvent, FavoriteEventSink};

// A job runs on the worker with exclusive access to the collection and
// reports its own result through the oneshot it captured.
type Job = Box<dyn FnOnce(&mut FavoriteCollection, &dyn FavoriteEventSink) + Send + 'static>;

/// Favorite store kept in process memory.
///
/// A single background task owns the collection and applies jobs one at a
/// time, so concurrent callers never race on it. Handles are cheap to clone;
/// the task stops once every handle is dropped.
#[derive(Clone)]
pub struct InMemoryFavoriteStore {
    tx: mpsc::Sender<Job>,
}

impl InMemoryFavoriteStore {
    /// Spawns the store worker with default settings. Requires a Tokio runtime.
    pub fn spawn(event_sink: Arc<dyn FavoriteEventSink>) -> Self {
        Self::spawn_with_config(event_sink, StoreConfig::default())
    }

    /// Spawns the store worker. Requires a Tokio runtime.
    pub fn spawn_with_config(
        event_sink: Arc<dyn FavoriteEventSink>,
        config: StoreConfig,
    ) -> Self {
        let (tx, mut rx) = mpsc::channel::<Job>(config.mailbox_capacity.max(1));
        let latency = config.latency;

        tokio::spawn(async move {
            debug!("Favorite store worker started (latency {:?})", latency);
            let mut favorites = FavoriteCollection::new();

            while let Some(job) = rx.recv().await {
                if !latency.is_zero() {
                    tokio::time::sleep(latency).await;
                }
                job(&mut favorites, event_sink.as_ref());
            }
            // Every handle was dropped.
            debug!("Favorite store worker stopped");
        });

        Self { tx }
    }

    /// Runs `job` on the worker and waits for its result.
    async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut FavoriteCollection, &dyn FavoriteEventSink) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send(Box::new(
                move |favorites: &mut FavoriteCollection, sink: &dyn FavoriteEventSink| {
                    // The caller may have gone away; nothing to report then.
                    let _ = ret_tx.send(job(favorites, sink));
                },
            ))
            .await
            .map_err(|_| StorageError::Unavailable("worker is not running".to_string()))?;

        ret_rx
            .await
            .map_err(|_| StorageError::Unavailable("worker dropped the reply".to_string()))?
    }
}

#[async_trait]
impl FavoriteStoreTrait for InMemoryFavoriteStore {
    async fn save(&self, key: &FavoriteKey, symbol: &Symbol) -> Result<()> {
        let key = key.clone();
        let symbol = symbol.with_favorite(true);

        self.exec(move |favorites, sink| {
            debug!("Saving favorite {} under {}", symbol.name, key.category_name);
            insert_favorite(favorites, &key, symbol.clone());
            sink.emit(FavoriteEvent::added(symbol));
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &FavoriteKey, symbol: &Symbol) -> Result<()> {
        let key = key.clone();
        let symbol = symbol.with_favorite(false);

        self.exec(move |favorites, sink| {
            if remove_favorite(favorites, &key, &symbol) {
                debug!("Deleted favorite {} from {}", symbol.name, key.category_name);
                sink.emit(FavoriteEvent::removed(symbol));
            } else {
                debug!(
                    "Favorite {} not found under {}, nothing to delete",
                    symbol.name, key.category_name
                );
            }
            Ok(())
        })
        .await
    }

    async fn get_all(&self) -> Result<FavoriteCollection> {
        self.exec(|favorites, _| Ok(favorites.clone())).await
    }
}
