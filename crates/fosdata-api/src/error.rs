use thiserror::Error;

/// Top-level error type for the `fosdata-api` crate.
///
/// Covers every failure mode of a CMDB read: authentication, transport,
/// server-side rejection, and envelope decoding. `fosdata-core` sorts these
/// into transport-class and server-class failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected or missing permissions (HTTP 401 / 403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    InvalidBaseUrl(String),

    /// A keyed read was asked for with an empty key, which would address
    /// the whole table instead of one entry.
    #[error("Empty lookup key for {path}")]
    EmptyKey { path: String },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── CMDB API ────────────────────────────────────────────────────
    /// The appliance rejected the request for a reason other than absence.
    #[error("CMDB API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` for failures of the connection or credentials rather
    /// than of the requested object. Request-construction errors
    /// (`InvalidUrl`, `InvalidBaseUrl`, `EmptyKey`) are neither.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. }
                | Self::Transport(_)
                | Self::Tls(_)
        )
    }

    /// Returns `true` when the request could not be built from the
    /// configured base URL and key.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::InvalidBaseUrl(_) | Self::EmptyKey { .. }
        )
    }

    /// HTTP status reported by the appliance, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
