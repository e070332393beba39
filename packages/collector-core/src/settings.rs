//! Workspace settings abstraction and credential resolution.
//!
//! The core never touches the process environment directly. Callers inject
//! a [`SettingsProvider`]; production uses an env-backed provider, tests use
//! [`StaticSettings`]. Credentials are resolved fresh for every operation
//! rather than cached, so a rotated key takes effect without a restart.

use std::collections::HashMap;
use std::fmt;

/// Logical names of the required settings, independent of whatever backend
/// (environment variable, secret store) a provider maps them to.
pub mod setting_names {
    /// The Log Analytics workspace identifier.
    pub const WORKSPACE_ID: &str = "LOG_ANALYTICS_WORKSPACE_ID";
    /// The base64-encoded workspace shared key.
    pub const WORKSPACE_KEY: &str = "LOG_ANALYTICS_WORKSPACE_KEY";
}

/// Errors from settings resolution.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required setting is absent or empty. Absence is always fatal to the
    /// operation; no defaults are ever substituted.
    #[error("missing required configuration setting: {name}")]
    MissingConfiguration { name: String },
}

/// Read access to named settings.
pub trait SettingsProvider: Send + Sync {
    /// Resolves the setting `name` to its value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingConfiguration`] when the setting is
    /// absent or empty.
    fn resolve(&self, name: &str) -> Result<String, SettingsError>;
}

/// In-memory provider backed by a map. Used by tests across crates.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    values: HashMap<String, String>,
}

impl StaticSettings {
    /// Creates an empty provider; every resolution fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a setting, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl SettingsProvider for StaticSettings {
    fn resolve(&self, name: &str) -> Result<String, SettingsError> {
        match self.values.get(name) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(SettingsError::MissingConfiguration {
                name: name.to_string(),
            }),
        }
    }
}

/// Workspace identifier and shared key for one operation.
///
/// The key is a secret: the `Debug` impl redacts it, and nothing in this
/// crate ever writes it to a log or error message.
#[derive(Clone)]
pub struct WorkspaceCredentials {
    /// Workspace identifier, used in the target hostname and the
    /// `Authorization` header.
    pub workspace_id: String,
    pub(crate) workspace_key: String,
}

impl WorkspaceCredentials {
    /// Builds credentials from raw parts. The key must be base64 text;
    /// decoding is deferred to signing.
    #[must_use]
    pub fn new(workspace_id: String, workspace_key: String) -> Self {
        Self {
            workspace_id,
            workspace_key,
        }
    }

    /// Resolves both required settings from the provider.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingConfiguration`] naming whichever
    /// setting is absent.
    pub fn resolve(provider: &dyn SettingsProvider) -> Result<Self, SettingsError> {
        Ok(Self {
            workspace_id: provider.resolve(setting_names::WORKSPACE_ID)?,
            workspace_key: provider.resolve(setting_names::WORKSPACE_KEY)?,
        })
    }
}

impl fmt::Debug for WorkspaceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceCredentials")
            .field("workspace_id", &self.workspace_id)
            .field("workspace_key", &"<redacted>")
            .finish()
    }
}
