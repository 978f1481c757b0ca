//! Fire-and-forget analytics.
//!
//! The tracker posts one [`TelemetryEvent`] per call to
//! `/analytics/events` through the user client. Delivery is best effort:
//! every operation resolves to a [`TrackOutcome`] and nothing is ever
//! raised to the caller. Failures are logged at debug level and dropped.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use storefront_types::{EventKind, Metadata, ProductId, SessionId, TelemetryEvent};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::api::{ApiClient, ApiError, check_status};
use crate::constants::{ANALYTICS_EVENTS_PATH, SESSION_ID_KEY};
use crate::storage::{KeyValueStore, StorageError};

/// Where the user currently is, for events that don't name a page.
pub trait LocationSource: Send + Sync {
    fn current_path(&self) -> String;
}

impl<F> LocationSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn current_path(&self) -> String {
        self()
    }
}

/// A settable current path shared between navigation and the tracker.
#[derive(Debug, Clone)]
pub struct CurrentLocation(Arc<RwLock<String>>);

impl CurrentLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(path.into())))
    }

    pub fn set(&self, path: impl Into<String>) {
        *self.0.write() = path.into();
    }

    pub fn get(&self) -> String {
        self.0.read().clone()
    }
}

impl Default for CurrentLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationSource for CurrentLocation {
    fn current_path(&self) -> String {
        self.get()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("session storage unavailable: {0}")]
    Storage(#[from] StorageError),
    #[error("event not delivered: {0}")]
    Api(#[from] ApiError),
}

/// Result of one submission. Callers are free to ignore it.
#[derive(Debug)]
pub enum TrackOutcome {
    Delivered,
    Dropped(TrackError),
}

impl TrackOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, TrackOutcome::Delivered)
    }

    fn log(&self, event_type: &str) {
        match self {
            TrackOutcome::Delivered => tracing::debug!(event_type, "analytics event delivered"),
            TrackOutcome::Dropped(e) => tracing::debug!(event_type, error = %e, "analytics event dropped"),
        }
    }
}

/// Session-scoped event tracker. Cheap to clone.
#[derive(Clone)]
pub struct EventTracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    client: ApiClient,
    session: Arc<dyn KeyValueStore>,
    location: Arc<dyn LocationSource>,
    // Serializes get-or-create so concurrent first events share one id.
    session_init: Mutex<()>,
}

impl EventTracker {
    pub fn new(client: ApiClient, session: Arc<dyn KeyValueStore>, location: Arc<dyn LocationSource>) -> Self {
        Self {
            inner: Arc::new(TrackerInner { client, session, location, session_init: Mutex::new(()) }),
        }
    }

    /// The session id, created and stored on first use.
    pub fn session_id(&self) -> Result<SessionId, StorageError> {
        let _guard = self.inner.session_init.lock();
        if let Some(id) = self.inner.session.get(SESSION_ID_KEY).and_then(|raw| SessionId::from_stored(raw)) {
            return Ok(id);
        }
        let id = SessionId::generate();
        self.inner.session.set(SESSION_ID_KEY, id.as_str())?;
        tracing::debug!(session = %id.short(), "analytics session started");
        Ok(id)
    }

    /// Record a `page_view` for `path`.
    pub async fn track_page_view(&self, path: &str) -> TrackOutcome {
        match self.session_id() {
            Ok(session) => self.submit(&TelemetryEvent::page_view(path, session, Utc::now())).await,
            Err(e) => dropped(EventKind::PageView.into(), e.into()),
        }
    }

    /// Record an arbitrary event on the current page.
    ///
    /// `data` is merged into the metadata; its `timestamp` key, if any, is
    /// replaced. An empty `product_id` is treated as absent.
    pub async fn track_event(&self, name: &str, data: Metadata, product_id: Option<ProductId>) -> TrackOutcome {
        let session = match self.session_id() {
            Ok(session) => session,
            Err(e) => return dropped(name, e.into()),
        };
        let event = TelemetryEvent::builder(name, session)
            .page(self.inner.location.current_path())
            .metadata(data)
            .product_id(product_id)
            .build();
        self.submit(&event).await
    }

    /// Record a `product_view` with the product's name and category.
    pub async fn track_product_view(
        &self,
        product_id: impl Into<ProductId>,
        product_name: &str,
        category: &str,
    ) -> TrackOutcome {
        let mut data = Metadata::new();
        data.insert("productName".into(), product_name.into());
        data.insert("category".into(), category.into());
        self.track_event(EventKind::ProductView.into(), data, Some(product_id.into())).await
    }

    /// POST a built event. Only a 2xx counts as delivered.
    pub async fn submit(&self, event: &TelemetryEvent) -> TrackOutcome {
        let span = tracing::debug_span!(
            "analytics.submit",
            event_type = %event.event_type,
            page = %event.page,
            session = %event.session_id.short(),
        );
        let result = async {
            let response = self.inner.client.post(ANALYTICS_EVENTS_PATH, event).await?;
            check_status(response).await
        }
        .instrument(span)
        .await;

        let outcome = match result {
            Ok(_) => TrackOutcome::Delivered,
            Err(e) => TrackOutcome::Dropped(e.into()),
        };
        outcome.log(&event.event_type);
        outcome
    }

    /// [`track_page_view`](Self::track_page_view) on a background task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_page_view(&self, path: impl Into<String>) -> JoinHandle<TrackOutcome> {
        let tracker = self.clone();
        let path = path.into();
        tokio::spawn(async move { tracker.track_page_view(&path).await })
    }

    /// [`track_event`](Self::track_event) on a background task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_event(
        &self,
        name: impl Into<String>,
        data: Metadata,
        product_id: Option<ProductId>,
    ) -> JoinHandle<TrackOutcome> {
        let tracker = self.clone();
        let name = name.into();
        tokio::spawn(async move { tracker.track_event(&name, data, product_id).await })
    }
}

fn dropped(event_type: &str, error: TrackError) -> TrackOutcome {
    let outcome = TrackOutcome::Dropped(error);
    outcome.log(event_type);
    outcome
}

impl fmt::Debug for EventTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTracker")
            .field("client", &self.inner.client)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::storage::MemoryStore;
    use crate::tokens::{Scope, TokenLookup};

    fn tracker(session: Arc<MemoryStore>) -> EventTracker {
        let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
        let tokens: Arc<dyn TokenLookup> = Arc::new(|| None::<String>);
        let client = ApiClient::new(&config, Scope::User, tokens).unwrap();
        EventTracker::new(client, session, Arc::new(CurrentLocation::default()))
    }

    #[test]
    fn session_id_is_stable_until_cleared() {
        let session = Arc::new(MemoryStore::new());
        let tracker = tracker(session.clone());

        let first = tracker.session_id().unwrap();
        assert_eq!(first.as_str().len(), 26);
        assert_eq!(tracker.session_id().unwrap(), first);
        assert_eq!(session.get(SESSION_ID_KEY).as_deref(), Some(first.as_str()));

        session.clear().unwrap();
        let second = tracker.session_id().unwrap();
        assert_ne!(second, first);
    }

    #[test]
    fn existing_session_id_is_reused() {
        let session = Arc::new(MemoryStore::new());
        session.set(SESSION_ID_KEY, "abc123").unwrap();
        assert_eq!(tracker(session).session_id().unwrap().as_str(), "abc123");
    }

    #[test]
    fn current_location_defaults_to_root() {
        let location = CurrentLocation::default();
        assert_eq!(location.current_path(), "/");
        location.set("/product/42");
        assert_eq!(location.clone().current_path(), "/product/42");
    }
}
