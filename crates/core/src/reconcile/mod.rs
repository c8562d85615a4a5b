//! Reconciliation of denormalized favorite flags against the store.
//!
//! View models keep their own copy of the catalog with `is_favorite` set on
//! each symbol. These functions bring such a copy back in line, either from a
//! full store snapshot or from a single change event.

mod reconcile_service;

pub use reconcile_service::{apply_event, apply_favorite_event, reconcile_all};
