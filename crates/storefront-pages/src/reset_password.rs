//! Password reset from an emailed link.
//!
//! The link carries the reset token as `?token=`. Without one the page
//! bounces home with an error toast and never submits.

use storefront_client::AuthApi;

use crate::routes::query_value;
use crate::ui::{Navigator, Notifier};

pub const MISSING_TOKEN_MESSAGE: &str = "Missing token";
pub const EMPTY_PASSWORD_MESSAGE: &str = "Please enter a new password";
pub const SUCCESS_MESSAGE: &str = "Password updated. Please login.";
pub const FAILURE_FALLBACK: &str = "Reset failed";

pub const SUBMIT_LABEL: &str = "Update Password";
pub const SUBMITTING_LABEL: &str = "Updating...";

/// Where a submit attempt ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    MissingToken,
    EmptyPassword,
    Updated,
    /// The message shown to the user.
    Failed(String),
}

/// The reset form as the user sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetForm {
    pub heading: &'static str,
    pub field_label: &'static str,
    pub button_label: &'static str,
    pub button_disabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordPage {
    token: String,
    password: String,
    submitting: bool,
}

impl ResetPasswordPage {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), ..Default::default() }
    }

    /// Read the token from a location like `/reset-password?token=...`.
    pub fn from_location(location: &str) -> Self {
        Self::new(query_value(location, "token").unwrap_or_default())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn button_label(&self) -> &'static str {
        if self.submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL }
    }

    /// Run on first display. Returns `false` if the page redirected away.
    pub fn on_mount(&self, notifier: &dyn Notifier, navigator: &dyn Navigator) -> bool {
        if self.has_token() {
            return true;
        }
        notifier.error(MISSING_TOKEN_MESSAGE);
        navigator.navigate("/");
        false
    }

    /// Post the new password.
    pub async fn submit(
        &mut self,
        auth: &AuthApi,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> ResetOutcome {
        if !self.on_mount(notifier, navigator) {
            return ResetOutcome::MissingToken;
        }
        if self.password.is_empty() {
            notifier.error(EMPTY_PASSWORD_MESSAGE);
            return ResetOutcome::EmptyPassword;
        }

        self.submitting = true;
        let result = auth.reset_password(&self.token, &self.password).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                notifier.success(SUCCESS_MESSAGE);
                navigator.navigate("/");
                ResetOutcome::Updated
            }
            Err(e) => {
                tracing::debug!(error = %e, "password reset rejected");
                let message = e.user_message(FAILURE_FALLBACK);
                notifier.error(&message);
                ResetOutcome::Failed(message)
            }
        }
    }

    pub fn render(&self) -> ResetForm {
        ResetForm {
            heading: "Reset Password",
            field_label: "New Password",
            button_label: self.button_label(),
            button_disabled: self.submitting,
        }
    }
}
