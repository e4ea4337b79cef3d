// ── Core error types ──
//
// User-facing errors from fosdata-core. Consumers never see raw HTTP or
// JSON failures: the `From<fosdata_api::Error>` impl sorts them into
// transport-class and server-class variants.

use thiserror::Error;

use crate::reconcile::SetError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("cannot resolve lookup key: expected string or integer, got {found}")]
    LookupKeyType { found: &'static str },

    #[error("Unknown object kind: {kind}")]
    UnknownKind { kind: String },

    #[error("{kind} is addressed by '{key_field}' but no lookup key was given")]
    MissingKey {
        kind: String,
        key_field: &'static str,
    },

    // ── Reader errors ────────────────────────────────────────────────
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        /// `true` when the appliance rejected the credentials.
        auth: bool,
    },

    #[error("Server rejected request: {message}")]
    Server {
        message: String,
        status: Option<u16>,
    },

    // ── Reconcile errors ─────────────────────────────────────────────
    #[error("Error reading {field}: {source}")]
    FieldWrite {
        field: String,
        #[source]
        source: SetError,
    },

    // ── Context ──────────────────────────────────────────────────────
    #[error("describing {kind}: {source}")]
    Describe {
        kind: String,
        #[source]
        source: Box<CoreError>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Attach the object kind being described.
    pub fn describing(self, kind: &str) -> Self {
        Self::Describe {
            kind: kind.to_owned(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with `Describe` context stripped.
    pub fn root(&self) -> &Self {
        match self {
            Self::Describe { source, .. } => source.root(),
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fosdata_api::Error> for CoreError {
    fn from(err: fosdata_api::Error) -> Self {
        if err.is_request() {
            return Self::Config {
                message: err.to_string(),
            };
        }
        if err.is_transport() {
            return Self::Transport {
                auth: matches!(err, fosdata_api::Error::Authentication { .. }),
                message: err.to_string(),
            };
        }
        let status = err.status();
        let message = match err {
            fosdata_api::Error::Api { message, .. } => message,
            fosdata_api::Error::Deserialization { message, body: _ } => {
                format!("malformed response: {message}")
            }
            other => other.to_string(),
        };
        Self::Server { message, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_wraps_with_kind() {
        let err = CoreError::Server {
            message: "entry not found in datasource".into(),
            status: Some(500),
        }
        .describing("RouterStatic");
        assert_eq!(
            err.to_string(),
            "describing RouterStatic: Server rejected request: entry not found in datasource"
        );
        assert!(matches!(err.root(), CoreError::Server { status: Some(500), .. }));
    }

    #[test]
    fn api_errors_are_classified() {
        let auth: CoreError = fosdata_api::Error::Authentication {
            message: "token rejected".into(),
        }
        .into();
        assert!(matches!(auth, CoreError::Transport { auth: true, .. }));

        let server: CoreError = fosdata_api::Error::Api {
            status: 424,
            message: "bad vdom".into(),
        }
        .into();
        assert!(matches!(server, CoreError::Server { status: Some(424), .. }));

        let tls: CoreError = fosdata_api::Error::Tls("bad cert".into()).into();
        assert!(matches!(tls, CoreError::Transport { auth: false, .. }));

        let empty: CoreError = fosdata_api::Error::EmptyKey {
            path: "firewall.service/category".into(),
        }
        .into();
        assert!(matches!(empty, CoreError::Config { .. }));
        assert_eq!(
            empty.to_string(),
            "Configuration error: Empty lookup key for firewall.service/category"
        );
    }
}
