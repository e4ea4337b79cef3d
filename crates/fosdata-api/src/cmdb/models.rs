// CMDB API response types
//
// The CMDB endpoints answer with a loosely-typed envelope. `results` is an
// array for table objects and a bare object for singleton settings, so it is
// kept as a `Value` and unpacked by the client.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One configuration object as returned by the appliance: external field
/// keys mapped to scalars, nested objects, or arrays of objects.
pub type RawObject = Map<String, Value>;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard CMDB response envelope.
///
/// ```json
/// { "http_method": "GET", "status": "success", "http_status": 200,
///   "vdom": "root", "path": "firewall.service", "name": "category",
///   "results": [ { "name": "Web Access", ... } ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct CmdbResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub http_status: Option<u16>,
    #[serde(default)]
    pub results: Option<Value>,
    /// Numeric or textual error code on failures.
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub cli_error: Option<String>,
    #[serde(default)]
    pub vdom: Option<String>,
}

impl CmdbResponse {
    /// `true` unless the envelope explicitly reports an error.
    pub fn is_success(&self) -> bool {
        self.status.as_deref().is_none_or(|s| s == "success")
    }

    /// Best-effort human readable failure description.
    pub fn error_message(&self) -> String {
        if let Some(ref cli) = self.cli_error {
            return cli.trim().to_owned();
        }
        match self.error {
            Some(Value::String(ref s)) => s.clone(),
            Some(ref other) => format!("error {other}"),
            None => format!("status={}", self.status.as_deref().unwrap_or("unknown")),
        }
    }
}
