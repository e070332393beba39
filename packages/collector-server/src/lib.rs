//! Data Collector proxy server — HTTP listener, env-backed settings, and
//! reqwest transport around the `collector-core` engine.

pub mod network;
pub mod settings;
pub mod transport;

pub use settings::EnvSettings;
pub use transport::HttpTransport;
