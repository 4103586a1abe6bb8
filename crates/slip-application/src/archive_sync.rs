//! Archive listing synchronization.
//!
//! Fetches `GET /archives` and republishes the result in full. The published
//! listing is a snapshot: a failed fetch leaves the last known value visible
//! until the next successful sync.
//!
//! Fetches may overlap (one detached sync per action). Each fetch takes a
//! generation number before it is sent, and a snapshot is only published if
//! no later fetch has published already.

use slip_core::archive::ArchiveListing;
use slip_core::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::pipeline::RequestPipeline;

pub struct ArchiveSync {
    pipeline: Arc<RequestPipeline>,
    listing: watch::Sender<ArchiveListing>,
    issued: AtomicU64,
    published: AtomicU64,
}

impl ArchiveSync {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        let (listing, _) = watch::channel(ArchiveListing::default());
        Self {
            pipeline,
            listing,
            issued: AtomicU64::new(0),
            published: AtomicU64::new(0),
        }
    }

    /// Current published listing.
    pub fn current(&self) -> ArchiveListing {
        self.listing.borrow().clone()
    }

    /// Receiver notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<ArchiveListing> {
        self.listing.subscribe()
    }

    /// Manual refresh: fetches and publishes, returning the error on failure.
    ///
    /// If a fetch issued later has already published, the fetched snapshot
    /// is discarded and the newer published listing is returned.
    pub async fn refresh(&self) -> Result<ArchiveListing> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let listing: ArchiveListing = self.pipeline.get_json("/archives").await?;

        // The comparison runs under the channel's write lock, so two
        // completions cannot interleave between check and publish.
        let fresh = self.listing.send_if_modified(|current| {
            if generation <= self.published.load(Ordering::SeqCst) {
                return false;
            }
            self.published.store(generation, Ordering::SeqCst);
            *current = listing.clone();
            true
        });

        if fresh {
            tracing::debug!(
                "[ArchiveSync] Published generation {}: {} csv / {} pdf entries",
                generation,
                listing.csv.len(),
                listing.pdf.len()
            );
            Ok(listing)
        } else {
            tracing::debug!(
                "[ArchiveSync] Discarding generation {}, superseded by {}",
                generation,
                self.published.load(Ordering::SeqCst)
            );
            Ok(self.current())
        }
    }

    /// Best-effort sync. Failures are logged and swallowed.
    ///
    /// Returns `true` if the fetch succeeded.
    pub async fn sync(&self) -> bool {
        match self.refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("[ArchiveSync] Sync failed, keeping last listing: {}", e);
                false
            }
        }
    }

    /// Starts a best-effort sync on a detached task.
    ///
    /// The caller may await the handle or drop it; dropping does not cancel
    /// the sync.
    pub fn spawn_sync(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.sync().await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedTransport;
    use serde_json::json;
    use slip_core::error::SlipError;
    use slip_core::idempotency::KeyStrategy;
    use slip_core::transport::Method;
    use slip_infrastructure::MemoryCredentialStore;

    fn sync_over(transport: Arc<ScriptedTransport>) -> Arc<ArchiveSync> {
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            Arc::new(MemoryCredentialStore::with_token("tok")),
            Arc::new(KeyStrategy::Uuid),
        ));
        Arc::new(ArchiveSync::new(pipeline))
    }

    fn one_csv() -> serde_json::Value {
        json!({
            "csv": [{"name": "a.csv", "url": "/f/a.csv", "modified": "t", "size_bytes": 10}],
            "pdf": []
        })
    }

    #[tokio::test]
    async fn test_published_listing_equals_backend_structure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 200, one_csv());
        let sync = sync_over(transport);

        assert!(sync.sync().await);

        let published = serde_json::to_value(sync.current()).unwrap();
        assert_eq!(published, one_csv());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_listing() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 200, one_csv());
        let sync = sync_over(transport.clone());
        sync.sync().await;

        transport.respond(Method::Get, "/archives", 500, json!({"detail": "disk error"}));
        assert!(!sync.sync().await);
        assert_eq!(sync.current().csv[0].name, "a.csv");

        transport.fail(Method::Get, "/archives", "Network Error");
        assert!(!sync.sync().await);
        assert_eq!(sync.current().csv.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_replaces_instead_of_merging() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 200, one_csv());
        let sync = sync_over(transport.clone());
        sync.sync().await;

        transport.respond(
            Method::Get,
            "/archives",
            200,
            json!({
                "csv": [],
                "pdf": [{"name": "p.pdf", "url": "/f/p.pdf", "modified": "u", "size_bytes": 5}]
            }),
        );
        sync.sync().await;

        let listing = sync.current();
        assert!(listing.csv.is_empty());
        assert_eq!(listing.pdf[0].name, "p.pdf");
    }

    #[tokio::test]
    async fn test_refresh_surfaces_errors() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 403, json!({"detail": "Managers only"}));
        let sync = sync_over(transport);

        let err = sync.refresh().await.unwrap_err();
        assert_eq!(err, SlipError::http(403, Some("Managers only".to_string())));
        assert!(sync.current().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_new_snapshots() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 200, one_csv());
        let sync = sync_over(transport);
        let mut rx = sync.subscribe();

        sync.spawn_sync().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().csv.len(), 1);
    }

    fn two_csv() -> serde_json::Value {
        json!({
            "csv": [
                {"name": "a.csv", "url": "/f/a.csv", "modified": "t", "size_bytes": 10},
                {"name": "b.csv", "url": "/f/b.csv", "modified": "u", "size_bytes": 20}
            ],
            "pdf": []
        })
    }

    async fn wait_for_requests(transport: &ScriptedTransport, path: &str, count: usize) {
        while transport.requests_to(path).len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_slow_older_sync_does_not_overwrite_newer_listing() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 200, one_csv());
        let hold = transport.hold_next("/archives");
        let sync = sync_over(transport.clone());

        // Older fetch: answered with one file, then held in flight.
        let older = sync.spawn_sync();
        wait_for_requests(&transport, "/archives", 1).await;

        // Newer fetch completes first and sees both files.
        transport.respond(Method::Get, "/archives", 200, two_csv());
        assert!(sync.sync().await);
        assert_eq!(sync.current().csv.len(), 2);

        hold.add_permits(1);
        older.await.unwrap();

        let names: Vec<String> = sync.current().csv.into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[tokio::test]
    async fn test_superseded_refresh_returns_newer_listing() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(Method::Get, "/archives", 200, one_csv());
        let hold = transport.hold_next("/archives");
        let sync = sync_over(transport.clone());

        let older = tokio::spawn({
            let sync = sync.clone();
            async move { sync.refresh().await }
        });
        wait_for_requests(&transport, "/archives", 1).await;

        transport.respond(Method::Get, "/archives", 200, two_csv());
        sync.refresh().await.unwrap();

        hold.add_permits(1);
        let returned = older.await.unwrap().unwrap();
        assert_eq!(returned.csv.len(), 2);
        assert_eq!(returned, sync.current());
    }
}
