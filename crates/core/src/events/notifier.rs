//! In-process fan-out of favorite events to any number of subscribers.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::{debug, error, trace};

use super::{FavoriteEvent, FavoriteEventSink};

type Callback = Arc<dyn Fn(&FavoriteEvent) + Send + Sync>;

#[derive(Clone)]
struct Subscriber {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback,
}

#[derive(Default)]
struct NotifierState {
    next_id: AtomicU64,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl NotifierState {
    fn remove(&self, id: u64) {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|s| s.id != id);
    }
}

/// Publish/subscribe channel for favorite events.
///
/// Cloning yields another handle to the same subscriber list. Each
/// application (or test) owns its own notifier and passes it to the store
/// and the view models that need it.
///
/// Events are delivered synchronously on the publishing task, in
/// registration order, exactly once per live subscriber. Delivery iterates
/// over a snapshot of the list, so callbacks may subscribe or unsubscribe.
/// A panicking callback is logged and skipped; the others still run.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    state: Arc<NotifierState>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every subsequent event.
    ///
    /// The registration lasts as long as the returned [`Subscription`].
    #[must_use = "dropping the subscription unregisters the callback"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&FavoriteEvent) + Send + Sync + 'static,
    {
        let id = self.state.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        let subscriber = Subscriber {
            id,
            active: Arc::clone(&active),
            callback: Arc::new(callback),
        };

        self.state
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
        debug!("Favorite subscriber {} registered", id);

        Subscription {
            id,
            active,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Delivers `event` to every currently registered subscriber.
    pub fn publish(&self, event: &FavoriteEvent) {
        let snapshot: Vec<Subscriber> = self
            .state
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        trace!("Delivering {:?} to {} subscribers", event, snapshot.len());
        for subscriber in snapshot {
            // Skip anyone who unregistered after the snapshot was taken.
            if !subscriber.active.load(Ordering::SeqCst) {
                continue;
            }
            let delivered =
                panic::catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(event)));
            if delivered.is_err() {
                error!(
                    "Favorite subscriber {} panicked while handling {:?}",
                    subscriber.id, event
                );
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FavoriteEventSink for ChangeNotifier {
    fn emit(&self, event: FavoriteEvent) {
        self.publish(&event);
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Handle to a registered callback; unregisters on drop.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    state: Weak<NotifierState>,
}

impl Subscription {
    /// Unregisters the callback now instead of at drop.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(state) = self.state.upgrade() {
            state.remove(self.id);
            debug!("Favorite subscriber {} unregistered", self.id);
        }
    }
}
