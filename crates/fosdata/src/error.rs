//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fosdata_config::ConfigError;
use fosdata_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the appliance: {message}")]
    #[diagnostic(
        code(fosdata::connection_failed),
        help(
            "Check that the appliance is reachable and the REST API is enabled.\n\
             Self-signed certificate? Use --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Token rejected: {message}")]
    #[diagnostic(
        code(fosdata::auth_failed),
        help(
            "Verify the REST API administrator token and its trusted hosts.\n\
             Run: fosdata config set-token --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(fosdata::no_credentials),
        help(
            "Store one with: fosdata config set-token --profile {profile}\n\
             Or set the FOSDATA_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Objects ──────────────────────────────────────────────────────
    #[error("{kind} '{key}' not found")]
    #[diagnostic(
        code(fosdata::not_found),
        help("Check the lookup key and the VDOM (--vdom).")
    )]
    NotFound { kind: String, key: String },

    #[error("Unknown object kind '{kind}'")]
    #[diagnostic(code(fosdata::unknown_kind), help("Run: fosdata kinds"))]
    UnknownKind { kind: String },

    #[error("{kind} needs a lookup key ({key_field})")]
    #[diagnostic(
        code(fosdata::missing_key),
        help("Usage: fosdata read {kind} <{key_field}>")
    )]
    MissingKey { kind: String, key_field: String },

    #[error("Failed to read {kind}: {message}")]
    #[diagnostic(
        code(fosdata::schema_mismatch),
        help(
            "The appliance returned a value the declared schema cannot hold.\n\
             Run: fosdata schema {kind}"
        )
    )]
    SchemaMismatch { kind: String, message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(fosdata::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fosdata::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(fosdata::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: fosdata config set host <address> --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No appliance configured")]
    #[diagnostic(
        code(fosdata::no_config),
        help(
            "Pass --host, set FOSDATA_HOST, or add a profile:\n  \
             fosdata config set host <address>\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(fosdata::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON rendering failed: {0}")]
    #[diagnostic(code(fosdata::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(fosdata::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::UnknownKind { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::MissingKey { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a projector error, naming `profile` in credential help.
    ///
    /// Reader failures keep the `describing <Kind>` prefix.
    pub fn from_core(err: &CoreError, profile: &str) -> Self {
        let kind = match err {
            CoreError::Describe { kind, .. } => kind.clone(),
            _ => String::new(),
        };
        let in_context = |message: &str| {
            if kind.is_empty() {
                message.to_owned()
            } else {
                format!("describing {kind}: {message}")
            }
        };

        let root = err.root();
        match root {
            CoreError::Transport { auth: true, message } => CliError::AuthFailed {
                profile: profile.into(),
                message: in_context(message),
            },
            CoreError::Transport { auth: false, message } => CliError::ConnectionFailed {
                message: in_context(message),
            },
            CoreError::Server { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "malformed".into(), |s| s.to_string()),
                message: in_context(message),
            },
            CoreError::UnknownKind { kind } => CliError::UnknownKind { kind: kind.clone() },
            CoreError::MissingKey { kind, key_field } => CliError::MissingKey {
                kind: kind.clone(),
                key_field: (*key_field).into(),
            },
            CoreError::LookupKeyType { .. } => CliError::Validation {
                field: "key".into(),
                reason: root.to_string(),
            },
            CoreError::FieldWrite { .. } => CliError::SchemaMismatch {
                kind,
                message: root.to_string(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "host".into(),
                reason: message.clone(),
            },
            CoreError::Describe { .. } => CliError::ApiError {
                code: "internal".into(),
                message: err.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: String::from("(run: fosdata config profiles)"),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
