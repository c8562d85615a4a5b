//! Favorite change events.
//!
//! Provides the event types, the sink trait the favorite store emits through
//! after successful mutations, and the [`ChangeNotifier`] that fans events
//! out to view models.

mod favorite_event;
mod notifier;
mod sink;

pub use favorite_event::*;
pub use notifier::*;
pub use sink::*;
