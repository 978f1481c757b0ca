//! Telemetry events posted to `/analytics/events`.
//!
//! Events are transient: built per call, handed to the backend, never
//! stored locally. Every event's metadata carries an ISO-8601 `timestamp`
//! stamped at build time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProductId, SessionId};

/// Free-form event metadata (a JSON object).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Metadata key holding the event timestamp.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Well-known event type names.
///
/// `event_type` on the wire is an open string; these are the ones the
/// storefront itself emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    PageView,
    ProductView,
}

/// One telemetry event, exactly as serialized in the request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub event_type: String,
    pub page: String,
    pub session_id: SessionId,
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
}

impl TelemetryEvent {
    /// Start building an event of the given type.
    pub fn builder(event_type: impl Into<String>, session_id: SessionId) -> TelemetryEventBuilder {
        TelemetryEventBuilder {
            event_type: event_type.into(),
            session_id,
            page: None,
            metadata: Metadata::new(),
            product_id: None,
            at: None,
        }
    }

    /// A `page_view` event for `path`.
    pub fn page_view(path: impl Into<String>, session_id: SessionId, at: DateTime<Utc>) -> Self {
        Self::builder(EventKind::PageView.to_string(), session_id)
            .page(path)
            .at(at)
            .build()
    }

    /// The stamped timestamp, if present and parseable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.metadata.get(TIMESTAMP_KEY)?.as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Whether this is one of the well-known kinds.
    pub fn kind(&self) -> Option<EventKind> {
        self.event_type.parse().ok()
    }
}

/// Builder for [`TelemetryEvent`].
#[derive(Debug, Clone)]
pub struct TelemetryEventBuilder {
    event_type: String,
    session_id: SessionId,
    page: Option<String>,
    metadata: Metadata,
    product_id: Option<ProductId>,
    at: Option<DateTime<Utc>>,
}

impl TelemetryEventBuilder {
    /// Page path the event happened on. Defaults to `/`.
    pub fn page(mut self, path: impl Into<String>) -> Self {
        self.page = Some(path.into());
        self
    }

    /// Merge caller-supplied metadata. Later keys overwrite earlier ones.
    pub fn metadata(mut self, data: Metadata) -> Self {
        self.metadata.extend(data);
        self
    }

    /// Insert one metadata entry.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach a product. Empty ids are dropped.
    pub fn product_id(mut self, product_id: Option<ProductId>) -> Self {
        self.product_id = product_id.filter(|p| !p.is_empty());
        self
    }

    /// Override the build-time clock.
    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }

    /// Finish the event, stamping `metadata.timestamp`.
    ///
    /// The stamp is applied last so a caller-supplied `timestamp` key never
    /// survives.
    pub fn build(self) -> TelemetryEvent {
        let at = self.at.unwrap_or_else(Utc::now);
        let mut metadata = self.metadata;
        metadata.insert(TIMESTAMP_KEY.to_string(), crate::iso_timestamp(at).into());
        TelemetryEvent {
            event_type: self.event_type,
            page: self.page.unwrap_or_else(|| "/".to_string()),
            session_id: self.session_id,
            metadata,
            product_id: self.product_id,
        }
    }
}
