// ── Reader boundary ──
//
// The projector only needs "fetch this object or tell me it is absent".
// `CmdbClient` is the production reader; tests plug in in-memory fakes.

use std::future::Future;

use fosdata_api::{CmdbClient, RawObject};

use crate::error::CoreError;
use crate::schema::ObjectSchema;

/// Source of raw configuration objects.
///
/// `Ok(None)` signals that the object does not exist and is not an error.
/// Retry policy belongs to the implementation.
pub trait Reader {
    fn read(
        &self,
        object: &ObjectSchema,
        key: Option<&str>,
        scope: Option<&str>,
    ) -> impl Future<Output = Result<Option<RawObject>, CoreError>> + Send;
}

impl Reader for CmdbClient {
    async fn read(
        &self,
        object: &ObjectSchema,
        key: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Option<RawObject>, CoreError> {
        Ok(self.read_object(object.path, key, scope).await?)
    }
}
