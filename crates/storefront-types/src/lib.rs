//! Shared wire types for the storefront client.
//!
//! This crate has **no internal storefront dependencies**. It is the leaf
//! crate the client and page crates build on, and it only describes data:
//! nothing here touches the network or storage.
//!
//! # Key Types
//!
//! |-----------------------|------------------------------------------------|
//! | Type                  | Purpose                                        |
//! |-----------------------|------------------------------------------------|
//! | [`SessionId`]         | Per-session analytics correlation key          |
//! | [`ProductId`]         | Catalogue product reference                    |
//! | [`TelemetryEvent`]    | Body of `POST /analytics/events`               |
//! | [`EventKind`]         | Well-known event type names                    |
//! | [`CmsPage`]           | Response of `GET /cms/{slug}`                  |
//! | [`Slug`]              | Validated CMS page slug                        |
//! | [`ResetPasswordRequest`] | Body of `POST /auth/reset-password`         |
//! | [`ErrorBody`]         | FastAPI-style `{detail}` error response        |
//! |-----------------------|------------------------------------------------|

pub mod auth;
pub mod cms;
pub mod event;
pub mod ids;

// Re-export primary types at crate root for convenience.
pub use auth::{
    AdminLoginRequest, AdminProfile, AdminTokenResponse, ErrorBody, LoginRequest,
    RegisterRequest, ResetPasswordRequest, TokenResponse, User,
};
pub use cms::{CmsPage, SITE_NAME, Slug, SlugError, parse_timestamp};
pub use event::{EventKind, Metadata, TIMESTAMP_KEY, TelemetryEvent, TelemetryEventBuilder};
pub use ids::{ProductId, SessionId};

/// Format a timestamp the way browsers do for `Date.prototype.toISOString`:
/// UTC, millisecond precision, `Z` suffix.
pub fn iso_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
