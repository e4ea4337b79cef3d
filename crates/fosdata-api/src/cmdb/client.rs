// CMDB API HTTP client
//
// Wraps `reqwest::Client` with CMDB URL construction, envelope unwrapping,
// and the fixed retry count for transient transport failures.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::cmdb::models::{CmdbResponse, RawObject};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the appliance's CMDB API.
///
/// Every read returns `Ok(None)` when the object does not exist, keeping
/// absence distinct from transport and server failures.
pub struct CmdbClient {
    http: reqwest::Client,
    base_url: Url,
    retries: u32,
    retry_delay: Duration,
}

impl CmdbClient {
    /// Create a new client from a `TransportConfig` and API token.
    ///
    /// `base_url` is the appliance root (e.g. `https://192.168.1.99`).
    pub fn new(
        base_url: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        Ok(Self {
            http,
            base_url,
            retries: transport.retries,
            retry_delay: transport.retry_delay,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and no retries.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    /// Override the retry policy.
    pub fn with_retries(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = retry_delay;
        self
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/v2/cmdb/{path}[/{key}][?vdom={vdom}]`.
    ///
    /// `path` uses the API's `section.sub/table` form; the key is pushed as a
    /// single percent-encoded segment so values like `10.0.0.0/8` stay intact.
    /// An empty key is refused: it would address the table, not an entry.
    pub fn cmdb_url(
        &self,
        path: &str,
        key: Option<&str>,
        vdom: Option<&str>,
    ) -> Result<Url, Error> {
        if key.is_some_and(str::is_empty) {
            return Err(Error::EmptyKey {
                path: path.to_owned(),
            });
        }
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["api", "v2", "cmdb"]);
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(key) = key {
                segments.push(key);
            }
        }
        if let Some(vdom) = vdom.filter(|v| !v.is_empty()) {
            url.query_pairs_mut().append_pair("vdom", vdom);
        }
        Ok(url)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Read one CMDB object.
    ///
    /// `key` is `None` for singleton settings tables. Transient failures are
    /// retried up to the configured count with a fixed delay.
    pub async fn read_object(
        &self,
        path: &str,
        key: Option<&str>,
        vdom: Option<&str>,
    ) -> Result<Option<RawObject>, Error> {
        let url = self.cmdb_url(path, key, vdom)?;
        let mut attempt = 0;
        loop {
            match self.get_once(url.clone()).await {
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(%url, attempt, error = %e, "transient CMDB failure, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                }
                other => return other,
            }
        }
    }

    async fn get_once(&self, url: Url) -> Result<Option<RawObject>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!("object not found");
            return Ok(None);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: format!("token rejected (HTTP {status})"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<CmdbResponse>(&body).map_or_else(
                |_| body.chars().take(200).collect(),
                |env| env.error_message(),
            );
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: CmdbResponse = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        Self::unwrap_envelope(envelope, &body)
    }

    /// Pull the single object out of `results`.
    fn unwrap_envelope(envelope: CmdbResponse, body: &str) -> Result<Option<RawObject>, Error> {
        if envelope.http_status == Some(404) {
            debug!("object not found (envelope)");
            return Ok(None);
        }

        if !envelope.is_success() {
            return Err(Error::Api {
                status: envelope.http_status.unwrap_or(500),
                message: envelope.error_message(),
            });
        }

        trace!(vdom = ?envelope.vdom, "CMDB envelope ok");

        match envelope.results {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(obj)) => Ok(Some(obj)),
            Some(Value::Array(items)) => match items.into_iter().next() {
                None => Ok(None),
                Some(Value::Object(obj)) => Ok(Some(obj)),
                Some(other) => Err(Error::Deserialization {
                    message: format!("expected an object in results, got {other}"),
                    body: body.to_owned(),
                }),
            },
            Some(other) => Err(Error::Deserialization {
                message: format!("unexpected results shape: {other}"),
                body: body.to_owned(),
            }),
        }
    }
}
