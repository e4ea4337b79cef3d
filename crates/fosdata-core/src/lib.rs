// fosdata-core: Schema-driven projection of appliance config objects into
// typed attribute stores.

pub mod config;
pub mod error;
pub mod flatten;
pub mod model;
pub mod projector;
pub mod reader;
pub mod reconcile;
pub mod registry;
pub mod schema;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ApplianceConfig, TlsVerification};
pub use error::CoreError;
pub use flatten::flatten;
pub use projector::{Projector, ReadOutcome};
pub use reader::Reader;
pub use reconcile::{
    CompatibilityExemption, Destination, NeverExempt, PlaceholderExemption, SetError, reconcile,
};
pub use schema::{FieldKind, FieldSchema, ObjectSchema};
pub use store::AttributeStore;

pub use model::{FieldValue, LookupKey, NormalizedRecord, Scalar, resolve_key};

// Raw wire objects, for custom `Reader` implementations.
pub use fosdata_api::RawObject;
