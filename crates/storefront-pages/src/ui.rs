//! Side effects a page can request: toasts and navigation.

use std::sync::Arc;

use parking_lot::Mutex;
use storefront_client::CurrentLocation;

/// Toast notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Client-side navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Notifier that writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(toast = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(toast = "error", "{message}");
    }
}

impl Navigator for CurrentLocation {
    fn navigate(&self, path: &str) {
        self.set(path);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Records every toast and navigation, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingUi {
    notices: Arc<Mutex<Vec<Notice>>>,
    navigations: Arc<Mutex<Vec<String>>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().clone()
    }
}

impl Notifier for RecordingUi {
    fn success(&self, message: &str) {
        self.notices.lock().push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.lock().push(Notice::Error(message.to_string()));
    }
}

impl Navigator for RecordingUi {
    fn navigate(&self, path: &str) {
        self.navigations.lock().push(path.to_string());
    }
}
