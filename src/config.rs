//! Environment-backed configuration for the coordination core.

use thiserror::Error;

/// Environment variable naming the public base URL.
const BASE_URL_VAR: &str = "ATELIER_BASE_URL";
/// Environment variable naming the transactional sender address.
const SENDER_EMAIL_VAR: &str = "ATELIER_SENDER_EMAIL";
/// Environment variable naming the transactional sender display name.
const SENDER_NAME_VAR: &str = "ATELIER_SENDER_NAME";
/// Environment variable naming the workspace shown in invitation emails.
const WORKSPACE_NAME_VAR: &str = "ATELIER_WORKSPACE_NAME";

/// Runtime configuration consumed by the coordination services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    base_url: String,
    sender_email: String,
    sender_name: String,
    workspace_name: String,
}

impl CoreConfig {
    /// Creates a configuration from explicit values.
    ///
    /// Trailing slashes are stripped from the base URL so link formatting
    /// stays uniform.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        sender_email: impl Into<String>,
        sender_name: impl Into<String>,
        workspace_name: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            sender_email: sender_email.into(),
            sender_name: sender_name.into(),
            workspace_name: workspace_name.into(),
        }
    }

    /// Loads configuration from the process environment.
    ///
    /// Reads a `.env` file when present. Sender name and workspace name
    /// fall back to defaults; base URL and sender address are required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariable`] when a required variable is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let base_url = require_var(BASE_URL_VAR)?;
        let sender_email = require_var(SENDER_EMAIL_VAR)?;
        let sender_name = std::env::var(SENDER_NAME_VAR)
            .unwrap_or_else(|_| "Task Management System".to_owned());
        let workspace_name =
            std::env::var(WORKSPACE_NAME_VAR).unwrap_or_else(|_| "Atelier".to_owned());
        Ok(Self::new(base_url, sender_email, sender_name, workspace_name))
    }

    /// Returns the public base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the transactional sender address.
    #[must_use]
    pub fn sender_email(&self) -> &str {
        &self.sender_email
    }

    /// Returns the transactional sender display name.
    #[must_use]
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Returns the workspace display name used in invitation emails.
    #[must_use]
    pub fn workspace_name(&self) -> &str {
        &self.workspace_name
    }

    /// Builds the signup URL embedding an invitation token.
    #[must_use]
    pub fn signup_url(&self, token: &str) -> String {
        format!("{}/auth/signup?token={token}", self.base_url)
    }

    /// Builds the employee-facing link for a task.
    #[must_use]
    pub fn task_url(&self, task_id: impl std::fmt::Display) -> String {
        format!("{}/mytasks/{task_id}", self.base_url)
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(name)),
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required environment variable: {0}")]
    MissingVariable(&'static str),
}
