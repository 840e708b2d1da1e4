use serde::Deserialize;
use std::net::SocketAddr;

pub mod activation;
pub mod bridge;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod log;
pub mod payload;
pub mod server;

pub use activation::{ActivationSource, ControlRegistry};
pub use bridge::{attach, LogoutBridge};
pub use error::BridgeError;
pub use fetch::{JsonFetcher, ReqwestFetcher};
pub use log::{DiagnosticLog, MemoryLog, TracingLog};
pub use payload::{FieldValue, Payload};

pub const DEFAULT_CONTROL_ID: &str = "orcid-and-drupal-logout";

#[derive(Deserialize, Clone, Debug)]
pub struct BridgeConfig {
    /// Identity provider logout endpoint. Passed through as-is.
    pub logout_url: String,
    #[serde(default = "default_control_id")]
    pub control_id: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("ORCID_").from_env::<BridgeConfig>()
    }
}

fn default_control_id() -> String {
    DEFAULT_CONTROL_ID.to_string()
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}
