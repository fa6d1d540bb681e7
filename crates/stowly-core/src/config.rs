// ── Runtime platform configuration ──
//
// These types describe *how* to reach the rental backend. They carry
// credential data and connection tuning, but never touch disk. The CLI
// constructs a `PlatformConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use stowly_api::transport::{TlsMode, TransportConfig};
use stowly_api::PlatformClient;

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default for the public platform.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (staging environments behind self-signed TLS).
    DangerAcceptInvalid,
}

/// Configuration for connecting to the rental backend.
///
/// Built by the CLI, passed to the workflow -- core never reads config files.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Backend API root (e.g., `https://api.stowly.fr`).
    pub url: Url,
    /// Customer bearer token. `None` for anonymous browsing; the profile
    /// pre-fill and signature submission require it.
    pub auth_token: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl PlatformConfig {
    /// Build a ready-to-use `PlatformClient` from this config.
    pub fn build_client(&self) -> Result<PlatformClient, CoreError> {
        let mut transport = TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
            bearer_token: None,
        };
        if let Some(ref token) = self.auth_token {
            transport = transport.with_bearer_token(token.clone());
        }
        Ok(PlatformClient::new(self.url.clone(), &transport)?)
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            url: "https://api.stowly.fr"
                .parse()
                .unwrap_or_else(|_| unreachable!("static URL is valid")),
            auth_token: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
