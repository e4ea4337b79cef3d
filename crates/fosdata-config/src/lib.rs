//! Shared configuration for fosdata tools.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), and
//! translation to `fosdata_core::ApplianceConfig`. The CLI layers its
//! flag overrides on top of this.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use fosdata_core::{ApplianceConfig, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/token`.
pub const KEYRING_SERVICE: &str = "fosdata";

/// Environment variable consulted after a profile's `token_env`.
pub const TOKEN_ENV: &str = "FOSDATA_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile named by `requested`, else the configured default.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }

    /// Sorted profile names.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_retries() -> u32 {
    3
}

/// A named appliance profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Appliance address, e.g. "https://192.168.1.99" or "fgt.lab:8443".
    #[serde(default)]
    pub host: String,

    /// Default VDOM for reads. Unset means the appliance default.
    pub vdom: Option<String>,

    /// API token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override retry count for transient failures.
    pub retries: Option<u32>,
}

impl Profile {
    /// Set a field by its TOML name. Returns the canonical key.
    pub fn set_field(&mut self, key: &str, value: String) -> Result<&'static str, ConfigError> {
        let canonical = match key {
            "host" => {
                self.host = value;
                "host"
            }
            "vdom" => {
                self.vdom = Some(value);
                "vdom"
            }
            "token" => {
                self.token = Some(value);
                "token"
            }
            "token_env" | "token-env" => {
                self.token_env = Some(value);
                "token_env"
            }
            "ca_cert" | "ca-cert" => {
                self.ca_cert = Some(value.into());
                "ca_cert"
            }
            "insecure" => {
                self.insecure = Some(value.parse().map_err(|_| ConfigError::Validation {
                    field: "insecure".into(),
                    reason: "must be 'true' or 'false'".into(),
                })?);
                "insecure"
            }
            "timeout" => {
                self.timeout = Some(value.parse().map_err(|_| ConfigError::Validation {
                    field: "timeout".into(),
                    reason: "must be a number (seconds)".into(),
                })?);
                "timeout"
            }
            "retries" => {
                self.retries = Some(value.parse().map_err(|_| ConfigError::Validation {
                    field: "retries".into(),
                    reason: "must be a non-negative number".into(),
                })?);
                "retries"
            }
            other => {
                return Err(ConfigError::Validation {
                    field: other.into(),
                    reason: format!(
                        "unknown config key '{other}'. Valid keys: host, vdom, token, \
                         token_env, ca_cert, insecure, timeout, retries"
                    ),
                });
            }
        };
        Ok(canonical)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fosdata", "fosdata").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fosdata");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path`, overlaid with `FOSDATA_` environment variables.
///
/// A missing file is not an error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FOSDATA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution (without CLI flags) ────────────────────────────

/// Resolve the API token from the credential chain (no CLI flag step).
///
/// Order: `token_env` variable, `FOSDATA_TOKEN`, system keyring, plaintext.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            debug!(profile = profile_name, source = "token_env", "token resolved");
            return Ok(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(TOKEN_ENV) {
        debug!(profile = profile_name, source = TOKEN_ENV, "token resolved");
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
        if let Ok(secret) = entry.get_password() {
            debug!(profile = profile_name, source = "keyring", "token resolved");
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref token) = profile.token {
        debug!(profile = profile_name, source = "config", "token resolved");
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a token in the system keyring for `profile_name`.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))?;
    entry.set_password(token)?;
    Ok(())
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/token")
}

// ── Profile → ApplianceConfig ───────────────────────────────────────

/// Parse a profile host into a base URL. Bare hosts get `https://`.
pub fn parse_host(host: &str) -> Result<url::Url, ConfigError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "no appliance host configured".into(),
        });
    }
    let candidate = if host.contains("://") {
        host.to_owned()
    } else {
        format!("https://{host}")
    };
    candidate.parse().map_err(|_| ConfigError::Validation {
        field: "host".into(),
        reason: format!("invalid URL: {host}"),
    })
}

/// TLS mode for a profile: `insecure = true` wins, then `ca_cert`, then an
/// explicit `insecure = false` requests system roots.
pub fn tls_for(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    match (profile.insecure, profile.ca_cert.as_ref()) {
        (Some(true), _) => TlsVerification::DangerAcceptInvalid,
        (_, Some(ca_path)) => TlsVerification::CustomCa(ca_path.clone()),
        (Some(false), None) => TlsVerification::SystemDefaults,
        (None, None) if defaults.insecure => TlsVerification::DangerAcceptInvalid,
        (None, None) => TlsVerification::default(),
    }
}

/// Build an `ApplianceConfig` from a profile and an already resolved token.
pub fn appliance_config(
    profile: &Profile,
    defaults: &Defaults,
    token: SecretString,
) -> Result<ApplianceConfig, ConfigError> {
    let url = parse_host(&profile.host)?;
    let mut config = ApplianceConfig::new(url, token);
    config.vdom = profile.vdom.clone().filter(|v| !v.is_empty());
    config.tls = tls_for(profile, defaults);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.retries = profile.retries.unwrap_or(defaults.retries);
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert_eq!(cfg.defaults.retries, 3);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn loads_profiles_from_toml() {
        let file = write_config(
            r#"
            default_profile = "lab"

            [defaults]
            timeout = 10

            [profiles.lab]
            host = "fgt.lab:8443"
            vdom = "root"
            token = "plain"
            retries = 1

            [profiles.prod]
            host = "https://fgt.prod.example.net"
            insecure = false
            "#,
        );
        let cfg = load_config_from(file.path()).unwrap();

        assert_eq!(cfg.active_profile_name(None), "lab");
        assert_eq!(cfg.active_profile_name(Some("prod")), "prod");
        assert_eq!(cfg.profile_names(), vec!["lab", "prod"]);
        assert_eq!(cfg.defaults.timeout, 10);

        let lab = cfg.profile("lab").unwrap();
        assert_eq!(lab.vdom.as_deref(), Some("root"));
        assert_eq!(lab.retries, Some(1));
        assert!(matches!(
            cfg.profile("staging"),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn profile_translates_to_appliance_config() {
        let profile = Profile {
            host: "fgt.lab:8443".into(),
            vdom: Some("root".into()),
            timeout: Some(5),
            ..Profile::default()
        };
        let token = SecretString::from("plain".to_string());
        let config = appliance_config(&profile, &Defaults::default(), token).unwrap();

        assert_eq!(config.url.as_str(), "https://fgt.lab:8443/");
        assert_eq!(config.vdom.as_deref(), Some("root"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retries, 3);
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.token.expose_secret(), "plain");
    }

    #[test]
    fn tls_precedence() {
        let defaults = Defaults::default();
        let mut profile = Profile {
            ca_cert: Some("/etc/fgt-ca.pem".into()),
            ..Profile::default()
        };
        assert_eq!(
            tls_for(&profile, &defaults),
            TlsVerification::CustomCa("/etc/fgt-ca.pem".into())
        );

        profile.insecure = Some(true);
        assert_eq!(tls_for(&profile, &defaults), TlsVerification::DangerAcceptInvalid);

        profile.insecure = Some(false);
        profile.ca_cert = None;
        assert_eq!(tls_for(&profile, &defaults), TlsVerification::SystemDefaults);
    }

    #[test]
    fn host_parsing() {
        assert_eq!(
            parse_host("http://10.0.0.1").unwrap().as_str(),
            "http://10.0.0.1/"
        );
        assert!(matches!(
            parse_host("  "),
            Err(ConfigError::Validation { ref field, .. }) if field == "host"
        ));
    }

    #[test]
    fn set_field_validates() {
        let mut profile = Profile::default();
        assert_eq!(profile.set_field("token-env", "FGT_TOKEN".into()).unwrap(), "token_env");
        assert_eq!(profile.token_env.as_deref(), Some("FGT_TOKEN"));
        assert_eq!(profile.set_field("retries", "2".into()).unwrap(), "retries");
        assert_eq!(profile.retries, Some(2));
        assert!(profile.set_field("timeout", "soon".into()).is_err());
        assert!(profile.set_field("password", "x".into()).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                host: "fgt.lab".into(),
                vdom: Some("root".into()),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profile("default").unwrap().host, "fgt.lab");
        assert_eq!(loaded.profile("default").unwrap().vdom.as_deref(), Some("root"));
    }
}
