//! Environment-backed settings provider.

use collector_core::{setting_names, SettingsError, SettingsProvider};

/// Resolves workspace settings from process environment variables.
///
/// The logical setting names from `collector-core` are mapped to
/// configurable variable names; the defaults match the double-underscore
/// names the proxy has historically used. Unknown logical names are looked
/// up verbatim.
#[derive(Debug, Clone)]
pub struct EnvSettings {
    workspace_id_var: String,
    workspace_key_var: String,
}

impl EnvSettings {
    /// Creates a provider reading the given environment variable names.
    #[must_use]
    pub fn new(workspace_id_var: String, workspace_key_var: String) -> Self {
        Self {
            workspace_id_var,
            workspace_key_var,
        }
    }
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self::new(
            "LOG__ANALYTICS__WORKSPACE__ID".to_string(),
            "LOG__ANALYTICS__WORKSPACE__KEY".to_string(),
        )
    }
}

impl SettingsProvider for EnvSettings {
    fn resolve(&self, name: &str) -> Result<String, SettingsError> {
        let var = match name {
            setting_names::WORKSPACE_ID => self.workspace_id_var.as_str(),
            setting_names::WORKSPACE_KEY => self.workspace_key_var.as_str(),
            other => other,
        };
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(value),
            // The error names the logical setting, not the value: settings
            // are secrets and must never appear in messages or logs.
            _ => Err(SettingsError::MissingConfiguration {
                name: name.to_string(),
            }),
        }
    }
}
