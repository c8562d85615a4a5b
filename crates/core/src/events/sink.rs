//! Favorite event sink trait and implementations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::FavoriteEvent;

/// Trait for receiving favorite events.
///
/// The favorite store emits through this trait after each successful mutation,
/// on whatever task performed the mutation.
///
/// # Design Rules
///
/// - `emit()` must be fast and must not call back into the store
/// - Failure to emit must not affect store operations
pub trait FavoriteEventSink: Send + Sync {
    /// Emit a single favorite event.
    fn emit(&self, event: FavoriteEvent);
}

/// No-op implementation for stores nobody listens to.
#[derive(Clone, Default)]
pub struct NoOpFavoriteEventSink;

impl FavoriteEventSink for NoOpFavoriteEventSink {
    fn emit(&self, _event: FavoriteEvent) {}
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockFavoriteEventSink {
    events: Arc<Mutex<Vec<FavoriteEvent>>>,
}

impl MockFavoriteEventSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<FavoriteEvent> {
        self.lock().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FavoriteEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FavoriteEventSink for MockFavoriteEventSink {
    fn emit(&self, event: FavoriteEvent) {
        self.lock().push(event);
    }
}
