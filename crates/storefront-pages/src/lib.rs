//! Storefront pages
//!
//! Headless page models for the informational part of the storefront:
//! static pages (About, Contact, policies), CMS-backed legal pages, the
//! password reset flow, and the routing that picks between them.
//!
//! Pages produce plain data ([`PageShell`], [`ResetForm`]) and request
//! side effects through the [`Notifier`] and [`Navigator`] traits, so they
//! run the same under a real frontend and under test.
//!
//! # Key Types
//!
//! |-----------------------|------------------------------------------------|
//! | Type                  | Purpose                                        |
//! |-----------------------|------------------------------------------------|
//! | [`AppContext`]        | Owns config, storage, clients, tracker         |
//! | [`Route`]             | Location to page resolution                    |
//! | [`StaticPage`]        | About / Contact / Privacy / Returns / Terms    |
//! | [`LegalPage`]         | `/legal/{slug}` backed by `GET /cms/{slug}`    |
//! | [`ResetPasswordPage`] | Reset-token form and submission                |
//! | [`PageShell`]         | Header + body + footer (+ bottom nav)          |
//! |-----------------------|------------------------------------------------|

pub mod content;
pub mod context;
pub mod layout;
pub mod legal;
pub mod reset_password;
pub mod routes;
pub mod ui;

pub use content::StaticPage;
pub use context::{AppContext, ContextError, Visit};
pub use layout::{
    Article, Block, Body, BottomNav, Document, Footer, FooterLink, FooterSection, Header, NavTab,
    PageShell, ShellContext,
};
pub use legal::{LegalPage, LegalState};
pub use reset_password::{ResetForm, ResetOutcome, ResetPasswordPage};
pub use routes::Route;
pub use ui::{Navigator, Notice, Notifier, RecordingUi, TracingNotifier};
