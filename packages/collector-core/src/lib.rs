//! Data Collector proxy core — signs JSON payloads per the Azure Monitor
//! HTTP Data Collector protocol and classifies the ingestion endpoint's
//! responses into a stable (status, message) taxonomy.
//!
//! The crate is pure plumbing-free logic: no listener, no HTTP client, no
//! process environment. The server crate supplies a [`SettingsProvider`]
//! and a [`Transport`] and drives one [`DataCollectorApi::post_custom_log`]
//! call per inbound request.

pub mod api;
pub mod classify;
pub mod request;
pub mod settings;
pub mod signature;
pub mod transport;
pub mod types;

pub use api::DataCollectorApi;
pub use classify::classify_response;
pub use request::SignedRequest;
pub use settings::{
    setting_names, SettingsError, SettingsProvider, StaticSettings, WorkspaceCredentials,
};
pub use transport::{RemoteResponse, Transport, TransportError};
pub use types::{LogSubmission, OperationResult};
