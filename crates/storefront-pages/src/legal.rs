//! CMS-backed legal pages (`/legal/{slug}`).
//!
//! The page starts out [`LegalState::Loading`] and fetches
//! `GET /cms/{slug}` once on mount. Any failure, and a `null` body, land in
//! [`LegalState::NotFound`]; nothing is retried.

use storefront_client::{ApiClient, ApiError};
use storefront_types::{CmsPage, Slug};
use tracing::Instrument;

use crate::layout::{Body, Document, PageShell, ShellContext};

#[derive(Debug, Clone, PartialEq)]
pub enum LegalState {
    Loading,
    Loaded(CmsPage),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct LegalPage {
    slug: String,
    state: LegalState,
}

impl LegalPage {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into(), state: LegalState::Loading }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn state(&self) -> &LegalState {
        &self.state
    }

    /// Fetch the page content. Invalid slugs never reach the network.
    pub async fn load(&mut self, client: &ApiClient) -> &LegalState {
        self.state = LegalState::Loading;
        let span = tracing::info_span!("cms.fetch", slug = %self.slug);
        self.state = fetch(client, &self.slug).instrument(span).await;
        &self.state
    }

    pub fn render(&self, ctx: &ShellContext) -> PageShell {
        match &self.state {
            LegalState::Loading => PageShell::new(ctx, Body::Loading, false),
            LegalState::NotFound => PageShell::new(ctx, Body::NotFound, false),
            LegalState::Loaded(page) => {
                let body = Body::Document(Document {
                    title: page.title.clone(),
                    markdown: page.content.clone(),
                    updated_on: page.updated_on(),
                });
                PageShell::new(ctx, body, true).with_meta(page.document_title(), page.description())
            }
        }
    }
}

async fn fetch(client: &ApiClient, raw_slug: &str) -> LegalState {
    let slug = match Slug::parse(raw_slug) {
        Ok(slug) => slug,
        Err(e) => {
            tracing::debug!(error = %e, "not fetching invalid slug");
            return LegalState::NotFound;
        }
    };

    match client.get_json::<Option<CmsPage>>(&slug.api_path()).await {
        Ok(Some(page)) => {
            tracing::debug!(title = %page.title, "cms page loaded");
            LegalState::Loaded(page)
        }
        Ok(None) => {
            tracing::debug!("cms returned no page");
            LegalState::NotFound
        }
        Err(e @ ApiError::Status { .. }) => {
            tracing::debug!(error = %e, "cms page not available");
            LegalState::NotFound
        }
        Err(e) => {
            tracing::warn!(error = %e, "error fetching page");
            LegalState::NotFound
        }
    }
}
