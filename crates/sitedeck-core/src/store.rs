//! Catalog store
//!
//! The `Store` owns the current catalog snapshot and runs the load sequence:
//! fetch, parse, validate, publish.
//!
//! ## Snapshots
//!
//! A snapshot is published by swapping an `Arc`, so readers holding the old
//! one keep a consistent view until they drop it. A failed load never touches
//! the published snapshot.
//!
//! ## Overlapping loads
//!
//! Every load takes a ticket when it starts. When a load finishes after a
//! newer one has started, its result is discarded: the most recently
//! requested load wins.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::new(CatalogSource::parse("data/sites.json"));
//! store.load().await?;
//!
//! let snapshot = store.snapshot().unwrap();
//! let hits = search("rust", snapshot.entries());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::error::{LoadError, LoadResult};
use crate::models::CatalogSnapshot;
use crate::source::CatalogSource;
use crate::validate::validate;

/// What happened to a load that did not fail
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The snapshot was published
    Applied(Arc<CatalogSnapshot>),
    /// A newer load started while this one was in flight; result dropped
    Superseded,
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }
}

/// Holds the current catalog snapshot
pub struct Store {
    /// Where the catalog is loaded from
    source: CatalogSource,
    /// Published snapshot, if any load has succeeded
    snapshot: RwLock<Option<Arc<CatalogSnapshot>>>,
    /// Ticket of the most recently started load
    latest: AtomicU64,
}

impl Store {
    /// Create an empty store for a catalog location
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            snapshot: RwLock::new(None),
            latest: AtomicU64::new(0),
        }
    }

    /// Where this store loads from
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// The current snapshot, if a load has succeeded
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Fetch, parse and validate the catalog, then publish it
    ///
    /// On error the previously published snapshot stays in place. Calling
    /// this again is the retry.
    pub async fn load(&self) -> LoadResult<LoadOutcome> {
        let ticket = self.begin_load();
        debug!("Catalog load #{} from {}", ticket, self.source);

        let result = load_snapshot(&self.source).await;
        self.finish_load(ticket, result)
    }

    fn begin_load(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn finish_load(
        &self,
        ticket: u64,
        result: LoadResult<CatalogSnapshot>,
    ) -> LoadResult<LoadOutcome> {
        let snapshot = match result {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!("Catalog load #{} failed ({}): {}", ticket, e.kind(), e);
                return Err(e);
            }
        };

        let mut slot = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Checked under the write lock so a newer load can't publish in between
        if self.latest.load(Ordering::SeqCst) != ticket {
            info!("Catalog load #{} superseded, discarding", ticket);
            return Ok(LoadOutcome::Superseded);
        }

        info!(
            "Loaded catalog '{}' with {} entries",
            snapshot.config().site_title,
            snapshot.len()
        );
        *slot = Some(Arc::clone(&snapshot));
        Ok(LoadOutcome::Applied(snapshot))
    }
}

/// Run the full load sequence without touching any store
pub async fn load_snapshot(source: &CatalogSource) -> LoadResult<CatalogSnapshot> {
    let text = source.fetch_text().await?;
    parse_catalog(&text)
}

/// Parse and validate catalog JSON text
pub fn parse_catalog(text: &str) -> LoadResult<CatalogSnapshot> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    validate(&raw).map_err(LoadError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;
    use crate::group::group;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const THREE_SITES: &str = r#"{
        "config": { "siteTitle": "Directory", "adminContact": "admin@example.com" },
        "sites": [
            { "id": 1, "title": "One", "cover": "", "url": "https://one.example",
              "tags": ["a"], "description": "first" },
            { "id": 2, "title": "Two", "cover": "", "url": "https://two.example",
              "tags": ["b"], "description": "second" },
            { "id": 3, "title": "Three", "cover": "", "url": "https://three.example",
              "tags": ["a", "c"], "description": "third" }
        ]
    }"#;

    fn write_catalog(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("sites.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_and_group_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(&temp_dir, THREE_SITES);

        let store = Store::new(CatalogSource::File(path));
        assert!(store.snapshot().is_none());

        let outcome = store.load().await.unwrap();
        assert!(outcome.is_applied());

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.config().site_title, "Directory");

        let groups = group(snapshot.entries(), true);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        let a: Vec<i64> = groups["a"].iter().map(|e| e.id).collect();
        let b: Vec<i64> = groups["b"].iter().map(|e| e.id).collect();
        assert_eq!(a, vec![1, 3]);
        assert_eq!(b, vec![2]);
    }

    #[tokio::test]
    async fn test_missing_file_is_network_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(CatalogSource::File(temp_dir.path().join("nope.json")));

        let err = store.load().await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Network);
        assert!(store.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(&temp_dir, "{ not json");
        let store = Store::new(CatalogSource::File(path));

        let err = store.load().await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_bad_shape_is_validation_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(&temp_dir, r#"{"config":{"adminContact":""},"sites":[]}"#);
        let store = Store::new(CatalogSource::File(path));

        match store.load().await.unwrap_err() {
            LoadError::Validation(e) => assert_eq!(e.path, "config.siteTitle"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(&temp_dir, THREE_SITES);
        let store = Store::new(CatalogSource::File(path.clone()));
        store.load().await.unwrap();
        let before = store.snapshot().unwrap();

        std::fs::write(&path, r#"{"config":{},"sites":[]}"#).unwrap();
        assert!(store.load().await.is_err());

        let after = store.snapshot().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 3);
    }

    #[tokio::test]
    async fn test_reload_replaces_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_catalog(&temp_dir, THREE_SITES);
        let store = Store::new(CatalogSource::File(path.clone()));
        store.load().await.unwrap();
        let before = store.snapshot().unwrap();

        std::fs::write(
            &path,
            r#"{"config":{"siteTitle":"New","adminContact":""},"sites":[]}"#,
        )
        .unwrap();
        store.load().await.unwrap();

        let after = store.snapshot().unwrap();
        assert_eq!(after.config().site_title, "New");
        assert!(after.is_empty());
        // Readers holding the old snapshot still see it intact
        assert_eq!(before.len(), 3);
    }

    #[test]
    fn test_overlapping_load_is_superseded() {
        let store = Store::new(CatalogSource::File(PathBuf::from("unused.json")));

        let first = store.begin_load();
        let second = store.begin_load();

        let outcome = store
            .finish_load(first, parse_catalog(THREE_SITES))
            .unwrap();
        assert!(matches!(outcome, LoadOutcome::Superseded));
        assert!(store.snapshot().is_none());

        let outcome = store
            .finish_load(second, parse_catalog(THREE_SITES))
            .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(store.snapshot().unwrap().len(), 3);
    }

    #[test]
    fn test_superseded_failure_still_reported() {
        let store = Store::new(CatalogSource::File(PathBuf::from("unused.json")));
        let first = store.begin_load();
        let _second = store.begin_load();

        let err = store.finish_load(first, parse_catalog("{")).unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
    }

    #[test]
    fn test_parse_catalog() {
        let snapshot = parse_catalog(THREE_SITES).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(
            parse_catalog("[]").unwrap_err().kind(),
            LoadErrorKind::Validation
        );
        assert_eq!(parse_catalog("").unwrap_err().kind(), LoadErrorKind::Parse);
    }
}
