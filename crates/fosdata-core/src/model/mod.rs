// ── Projection model ──
//
// Typed values produced by the flattener and consumed by destinations.
// `Option<FieldValue>` is the absent/scalar/list variant: `None` means the
// appliance did not send the field.

pub mod lookup_key;
pub mod record;
pub mod value;

pub use lookup_key::{LookupKey, resolve_key};
pub use record::{NormalizedRecord, attribute_path};
pub use value::{FieldValue, Scalar};
