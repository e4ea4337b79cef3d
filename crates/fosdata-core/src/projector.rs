// ── Projector facade ──
//
// Ties the pieces together for one data-source read: resolve the lookup
// key, ask the reader, flatten, reconcile, mark identity.

use serde_json::Value;
use tracing::{debug, trace};

use fosdata_api::CmdbClient;

use crate::config::ApplianceConfig;
use crate::error::CoreError;
use crate::flatten::flatten;
use crate::model::LookupKey;
use crate::reader::Reader;
use crate::reconcile::{CompatibilityExemption, Destination, PlaceholderExemption, reconcile};
use crate::registry;
use crate::schema::ObjectSchema;

/// Result of a successful describe call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Attributes were written and identity set to `id`.
    Found { id: String },
    /// The appliance has no such object; identity was cleared.
    NotFound,
}

/// Reads appliance objects into destination stores.
///
/// Stateless between calls apart from the reader's own configuration.
pub struct Projector<R, E = PlaceholderExemption> {
    reader: R,
    exemption: E,
    default_scope: Option<String>,
}

impl Projector<CmdbClient> {
    /// Build a projector backed by the appliance REST API.
    pub fn connect(config: &ApplianceConfig) -> Result<Self, CoreError> {
        let client = CmdbClient::new(config.url.clone(), &config.token, &config.transport())?;
        let projector = Self::new(client);
        Ok(match config.vdom {
            Some(ref vdom) => projector.with_default_scope(vdom.clone()),
            None => projector,
        })
    }
}

impl<R: Reader> Projector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            exemption: PlaceholderExemption,
            default_scope: None,
        }
    }
}

impl<R, E> Projector<R, E>
where
    R: Reader + Sync,
    E: CompatibilityExemption + Sync,
{
    /// Swap the compatibility exemption policy.
    pub fn with_exemption<F: CompatibilityExemption>(self, exemption: F) -> Projector<R, F> {
        Projector {
            reader: self.reader,
            exemption,
            default_scope: self.default_scope,
        }
    }

    /// Scope used when a call does not name one. Empty means global.
    #[must_use]
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.default_scope = (!scope.is_empty()).then_some(scope);
        self
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Describe an object kind looked up by name in the registry.
    pub async fn describe_kind<D>(
        &self,
        kind: &str,
        key: Option<&Value>,
        scope: Option<&str>,
        dest: &mut D,
    ) -> Result<ReadOutcome, CoreError>
    where
        D: Destination + Send + ?Sized,
    {
        let object = registry::lookup(kind).ok_or_else(|| CoreError::UnknownKind {
            kind: kind.to_owned(),
        })?;
        self.describe(object, key, scope, dest).await
    }

    /// Read one object and write it into `dest`.
    ///
    /// A missing object clears the destination identity and succeeds. All
    /// errors carry the object kind as context.
    pub async fn describe<D>(
        &self,
        object: &ObjectSchema,
        key: Option<&Value>,
        scope: Option<&str>,
        dest: &mut D,
    ) -> Result<ReadOutcome, CoreError>
    where
        D: Destination + Send + ?Sized,
    {
        self.describe_inner(object, key, scope, dest)
            .await
            .map_err(|e| e.describing(object.kind))
    }

    async fn describe_inner<D>(
        &self,
        object: &ObjectSchema,
        key: Option<&Value>,
        scope: Option<&str>,
        dest: &mut D,
    ) -> Result<ReadOutcome, CoreError>
    where
        D: Destination + Send + ?Sized,
    {
        let scope = scope.or(self.default_scope.as_deref()).unwrap_or_default();
        let lookup = match (object.key_field, key) {
            (Some(key_field), Some(value)) => {
                let lookup = LookupKey::resolve(value)?.in_scope(scope);
                // An empty key would address the whole table.
                if lookup.key.is_empty() {
                    return Err(CoreError::MissingKey {
                        kind: object.kind.to_owned(),
                        key_field,
                    });
                }
                Some(lookup)
            }
            (Some(key_field), None) => {
                return Err(CoreError::MissingKey {
                    kind: object.kind.to_owned(),
                    key_field,
                });
            }
            (None, key) => {
                if key.is_some() {
                    trace!(kind = object.kind, "singleton object, ignoring lookup key");
                }
                None
            }
        };
        let scope = (!scope.is_empty()).then_some(scope);

        debug!(
            kind = object.kind,
            key = ?lookup.as_ref().map(ToString::to_string),
            "describing object"
        );

        let raw = self
            .reader
            .read(object, lookup.as_ref().map(|k| k.key.as_str()), scope)
            .await?;

        let Some(raw) = raw else {
            debug!(kind = object.kind, "object not found, clearing identity");
            dest.set_id("");
            return Ok(ReadOutcome::NotFound);
        };

        let record = flatten(object.fields, &raw);
        trace!(kind = object.kind, fields = record.len(), "flattened object");
        reconcile(dest, object.fields, &raw, &record, &self.exemption)?;

        let id = lookup.map_or_else(|| object.kind.to_owned(), |k| k.key);
        dest.set_id(&id);
        Ok(ReadOutcome::Found { id })
    }
}
