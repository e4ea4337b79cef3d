// ── Runtime connection configuration ──
//
// These types describe *how* to reach an appliance. They carry the API
// token and connection tuning but never touch disk: the CLI builds an
// `ApplianceConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use fosdata_api::{TlsMode, TransportConfig};

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for appliances.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for reading from a single appliance.
#[derive(Debug, Clone)]
pub struct ApplianceConfig {
    /// Appliance URL (e.g., `https://192.168.1.99`).
    pub url: Url,
    /// REST API administrator token.
    pub token: SecretString,
    /// Default scope (VDOM) for reads. `None` means global.
    pub vdom: Option<String>,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Extra attempts after a transient transport failure.
    pub retries: u32,
}

impl ApplianceConfig {
    pub fn new(url: Url, token: SecretString) -> Self {
        Self {
            url,
            token,
            vdom: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            retries: 3,
        }
    }

    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(ref path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            retries: self.retries,
            ..TransportConfig::default()
        }
    }
}
