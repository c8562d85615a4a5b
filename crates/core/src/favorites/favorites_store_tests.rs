//! Tests for the FavoriteStoreTrait contract against the in-memory backing.
//!
//! # Contract Points
//!
//! 1. Save appends under the key in insertion order and announces `FavoriteAdded`
//! 2. Delete removes every name match, drops emptied keys, and is a silent no-op otherwise
//! 3. Batch delete attempts everything and keeps successful deletions on failure
//! 4. Operations on the same key from many callers never lose updates

#[cfg(test)]
mod tests {
    use crate::catalog::Symbol;
    use crate::errors::{Error, Result, StorageError};
    use crate::events::{
        ChangeNotifier, FavoriteEvent, MockFavoriteEventSink, NoOpFavoriteEventSink,
    };
    use crate::favorites::{
        FavoriteCollection, FavoriteKey, FavoriteStoreTrait, InMemoryFavoriteStore, StoreConfig,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // =========================================================================
    // Helpers
    // =========================================================================

    fn communication() -> FavoriteKey {
        FavoriteKey::new("mic", "communication")
    }

    fn weather() -> FavoriteKey {
        FavoriteKey::new("sun.max", "weather")
    }

    fn names(favorites: &FavoriteCollection, key: &FavoriteKey) -> Vec<String> {
        favorites
            .get(key)
            .map(|symbols| symbols.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default()
    }

    fn quiet_store() -> InMemoryFavoriteStore {
        InMemoryFavoriteStore::spawn(Arc::new(NoOpFavoriteEventSink))
    }

    /// Store whose deletes always fail for one category.
    struct FailingDeleteStore {
        inner: InMemoryFavoriteStore,
        failing_category: String,
    }

    #[async_trait]
    impl FavoriteStoreTrait for FailingDeleteStore {
        async fn save(&self, key: &FavoriteKey, symbol: &Symbol) -> Result<()> {
            self.inner.save(key, symbol).await
        }

        async fn delete(&self, key: &FavoriteKey, symbol: &Symbol) -> Result<()> {
            if key.category_name == self.failing_category {
                return Err(StorageError::OperationFailed(format!(
                    "{} is read-only",
                    key.category_name
                ))
                .into());
            }
            self.inner.delete(key, symbol).await
        }

        async fn get_all(&self) -> Result<FavoriteCollection> {
            self.inner.get_all().await
        }
    }

    // =========================================================================
    // Save / Delete / Get
    // =========================================================================

    #[tokio::test]
    async fn test_communication_scenario() {
        let store = quiet_store();
        let key = communication();

        store.save(&key, &Symbol::new("mic")).await.unwrap();
        let favorites = store.get_all().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(names(&favorites, &key), vec!["mic"]);
        let (stored_key, _) = favorites.iter().next().unwrap();
        assert_eq!(stored_key.icon_name, "mic");

        store.delete(&key, &Symbol::new("mic")).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());

        store.save(&key, &Symbol::new("mic")).await.unwrap();
        store.save(&key, &Symbol::new("mic.fill")).await.unwrap();
        let favorites = store.get_all().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(names(&favorites, &key), vec!["mic", "mic.fill"]);
    }

    #[tokio::test]
    async fn test_saved_symbol_is_returned_under_its_key() {
        let store = quiet_store();

        store.save(&weather(), &Symbol::new("moon")).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        assert_eq!(names(&favorites, &weather()), vec!["moon"]);
        assert!(favorites[&weather()][0].is_favorite);
        assert!(names(&favorites, &communication()).is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice_matches_delete_once() {
        let store = quiet_store();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        store.save(&communication(), &Symbol::new("message")).await.unwrap();

        store.delete(&communication(), &Symbol::new("mic")).await.unwrap();
        let once = store.get_all().await.unwrap();
        store.delete(&communication(), &Symbol::new("mic")).await.unwrap();
        let twice = store.get_all().await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(names(&twice, &communication()), vec!["message"]);
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        let store = quiet_store();

        store.delete(&weather(), &Symbol::new("moon")).await.unwrap();

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_last_symbol_removes_key() {
        let store = quiet_store();
        store.save(&weather(), &Symbol::new("moon")).await.unwrap();

        store.delete(&weather(), &Symbol::new("moon")).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        assert!(!favorites.contains_key(&weather()));
    }

    #[tokio::test]
    async fn test_delete_matches_by_name_only() {
        let store = quiet_store();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();

        // Flag and icon differ, name and category match.
        let key = FavoriteKey::new("phone", "communication");
        store
            .delete(&key, &Symbol::new("mic").with_favorite(false))
            .await
            .unwrap();

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_keys_survive_deleting_one() {
        let store = quiet_store();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        store.save(&weather(), &Symbol::new("moon")).await.unwrap();
        store.save(&weather(), &Symbol::new("sun.max")).await.unwrap();

        store.delete(&communication(), &Symbol::new("mic")).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(names(&favorites, &weather()), vec!["moon", "sun.max"]);
    }

    #[tokio::test]
    async fn test_get_all_is_a_snapshot() {
        let store = quiet_store();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();

        let mut snapshot = store.get_all().await.unwrap();
        snapshot.clear();

        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_all_iterates_in_category_order() {
        let store = quiet_store();
        store.save(&weather(), &Symbol::new("moon")).await.unwrap();
        store.save(&FavoriteKey::new("car", "objects"), &Symbol::new("car")).await.unwrap();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        let order: Vec<&str> = favorites.keys().map(|k| k.category_name.as_str()).collect();
        assert_eq!(order, vec!["communication", "objects", "weather"]);
    }

    // =========================================================================
    // Events
    // =========================================================================

    #[tokio::test]
    async fn test_save_and_delete_emit_events() {
        let sink = MockFavoriteEventSink::new();
        let store = InMemoryFavoriteStore::spawn(Arc::new(sink.clone()));

        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        store.delete(&communication(), &Symbol::new("mic")).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_favorite());
        assert_eq!(events[0].symbol().name, "mic");
        assert!(events[0].symbol().is_favorite);
        assert_eq!(events[1], FavoriteEvent::removed(Symbol::new("mic")));
        assert!(!events[1].symbol().is_favorite);
    }

    #[tokio::test]
    async fn test_noop_delete_emits_nothing() {
        let sink = MockFavoriteEventSink::new();
        let store = InMemoryFavoriteStore::spawn(Arc::new(sink.clone()));

        store.delete(&communication(), &Symbol::new("mic")).await.unwrap();

        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_save_fans_out_to_every_subscriber_once() {
        let notifier = ChangeNotifier::new();
        let store = InMemoryFavoriteStore::spawn(Arc::new(notifier.clone()));

        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let first_sink = Arc::clone(&first);
        let second_sink = Arc::clone(&second);
        let _a = notifier.subscribe(move |e| first_sink.lock().unwrap().push(e.clone()));
        let _b = notifier.subscribe(move |e| second_sink.lock().unwrap().push(e.clone()));

        store.save(&communication(), &Symbol::new("mic")).await.unwrap();

        let expected = vec![FavoriteEvent::added(Symbol::new("mic"))];
        assert_eq!(*first.lock().unwrap(), expected);
        assert_eq!(*second.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_panicking_subscriber_keeps_store_running() {
        let notifier = ChangeNotifier::new();
        let store = InMemoryFavoriteStore::spawn(Arc::new(notifier.clone()));
        let faulty = notifier.subscribe(|_| panic!("subscriber failed"));

        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        drop(faulty);
        store.save(&communication(), &Symbol::new("mic.fill")).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        assert_eq!(names(&favorites, &communication()), vec!["mic", "mic.fill"]);
    }

    // =========================================================================
    // Batch delete
    // =========================================================================

    #[tokio::test]
    async fn test_delete_batch_removes_everything() {
        let store = quiet_store();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        store.save(&communication(), &Symbol::new("message")).await.unwrap();
        store.save(&weather(), &Symbol::new("moon")).await.unwrap();
        store.save(&weather(), &Symbol::new("sun.max")).await.unwrap();

        let mut batch = FavoriteCollection::new();
        batch.insert(communication(), vec![Symbol::new("mic"), Symbol::new("message")]);
        batch.insert(weather(), vec![Symbol::new("moon")]);
        store.delete_batch(&batch).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(names(&favorites, &weather()), vec!["sun.max"]);
    }

    #[tokio::test]
    async fn test_delete_batch_keeps_successes_when_one_fails() {
        let store = FailingDeleteStore {
            inner: quiet_store(),
            failing_category: "weather".to_string(),
        };
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        store.save(&weather(), &Symbol::new("moon")).await.unwrap();

        let mut batch = FavoriteCollection::new();
        batch.insert(weather(), vec![Symbol::new("moon")]);
        batch.insert(communication(), vec![Symbol::new("mic")]);
        let result = store.delete_batch(&batch).await;

        match result {
            Err(Error::Batch(aggregate)) => {
                assert_eq!(aggregate.len(), 1);
                assert!(aggregate.messages[0].contains("weather is read-only"));
            }
            other => panic!("Expected batch error, got {:?}", other),
        }

        let favorites = store.get_all().await.unwrap();
        assert!(!favorites.contains_key(&communication()));
        assert_eq!(names(&favorites, &weather()), vec!["moon"]);
    }

    #[tokio::test]
    async fn test_delete_batch_deduplicates_messages() {
        let store = FailingDeleteStore {
            inner: quiet_store(),
            failing_category: "weather".to_string(),
        };

        let mut batch = FavoriteCollection::new();
        batch.insert(
            weather(),
            vec![Symbol::new("moon"), Symbol::new("sun.max"), Symbol::new("cloud")],
        );
        let result = store.delete_batch(&batch).await;

        match result {
            Err(Error::Batch(aggregate)) => assert_eq!(aggregate.len(), 1),
            other => panic!("Expected batch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_succeeds() {
        let store = quiet_store();
        store.delete_batch(&FavoriteCollection::new()).await.unwrap();
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_on_one_key_are_not_lost() {
        let store = quiet_store();

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .save(&communication(), &Symbol::new(format!("symbol.{}", i)))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let favorites = store.get_all().await.unwrap();
        assert_eq!(favorites[&communication()].len(), 50);
    }

    #[tokio::test]
    async fn test_single_caller_order_is_preserved() {
        let store = quiet_store();

        for name in ["a", "b", "c", "d"] {
            store.save(&communication(), &Symbol::new(name)).await.unwrap();
        }
        store.delete(&communication(), &Symbol::new("b")).await.unwrap();
        store.save(&communication(), &Symbol::new("b")).await.unwrap();

        let favorites = store.get_all().await.unwrap();
        assert_eq!(names(&favorites, &communication()), vec!["a", "c", "d", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_latency_delays_operations() {
        let config = StoreConfig::default().with_latency(Duration::from_millis(250));
        let store =
            InMemoryFavoriteStore::spawn_with_config(Arc::new(NoOpFavoriteEventSink), config);

        let start = tokio::time::Instant::now();
        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        store.get_all().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_zero_mailbox_capacity_is_clamped() {
        let config = StoreConfig::default().with_mailbox_capacity(0);
        let store =
            InMemoryFavoriteStore::spawn_with_config(Arc::new(NoOpFavoriteEventSink), config);

        store.save(&communication(), &Symbol::new("mic")).await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[test]
    fn test_operations_fail_once_worker_is_gone() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let store = runtime.block_on(async { quiet_store() });
        drop(runtime);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = runtime.block_on(store.save(&communication(), &Symbol::new("mic")));

        assert!(matches!(
            result,
            Err(Error::Storage(StorageError::Unavailable(_)))
        ));
    }
}
