// ── NormalizedRecord -> destination store ──
//
// Writes are first-failure-wins. A rejected write is tolerated only when the
// compatibility exemption accepts the raw value the appliance sent for that
// field, which covers attributes older firmware leaves as placeholders.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use fosdata_api::RawObject;

use crate::error::CoreError;
use crate::model::{FieldValue, NormalizedRecord};
use crate::schema::FieldSchema;

/// Why a destination refused an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("unknown attribute '{path}'")]
    UnknownAttribute { path: String },

    #[error("type mismatch at '{path}': expected {expected}, got {got}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        got: &'static str,
    },
}

/// Attribute store of the hosting IaC runtime.
pub trait Destination {
    /// Write one top-level attribute.
    fn set(&mut self, field: &str, value: &FieldValue) -> Result<(), SetError>;

    /// Mark the logical identity of the object. Empty clears it.
    fn set_id(&mut self, id: &str);
}

/// Decides whether a rejected write may be ignored, given the raw value the
/// appliance sent for that field (`None` if it sent nothing).
pub trait CompatibilityExemption {
    fn is_exempt(&self, raw: Option<&Value>) -> bool;
}

impl<F> CompatibilityExemption for F
where
    F: Fn(Option<&Value>) -> bool,
{
    fn is_exempt(&self, raw: Option<&Value>) -> bool {
        self(raw)
    }
}

/// Default policy: tolerate rejections of placeholder values.
///
/// A placeholder is a missing value, `null`, an empty string, an empty
/// array, or an array whose first element is `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderExemption;

impl CompatibilityExemption for PlaceholderExemption {
    fn is_exempt(&self, raw: Option<&Value>) -> bool {
        match raw {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(items)) => items.first().is_none_or(Value::is_null),
            Some(Value::Bool(_) | Value::Number(_) | Value::Object(_)) => false,
        }
    }
}

/// Strict policy: every rejected write is fatal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExempt;

impl CompatibilityExemption for NeverExempt {
    fn is_exempt(&self, _raw: Option<&Value>) -> bool {
        false
    }
}

/// Write every declared field present in `record` into `dest`.
///
/// On failure the destination may already hold earlier fields.
pub fn reconcile<D, E>(
    dest: &mut D,
    fields: &[FieldSchema],
    raw: &RawObject,
    record: &NormalizedRecord,
    exemption: &E,
) -> Result<(), CoreError>
where
    D: Destination + ?Sized,
    E: CompatibilityExemption + ?Sized,
{
    for field in fields {
        let Some(value) = record.get(field.name) else {
            continue;
        };
        match dest.set(field.name, value) {
            Ok(()) => trace!(field = field.name, "attribute written"),
            Err(e) if exemption.is_exempt(raw.get(field.key)) => {
                debug!(field = field.name, error = %e, "ignoring rejected placeholder attribute");
            }
            Err(source) => {
                return Err(CoreError::FieldWrite {
                    field: field.name.to_owned(),
                    source,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Accepts everything except the listed attribute names.
    #[derive(Default)]
    struct Picky {
        reject: Vec<&'static str>,
        written: Vec<String>,
    }

    impl Destination for Picky {
        fn set(&mut self, field: &str, _value: &FieldValue) -> Result<(), SetError> {
            if self.reject.iter().any(|r| *r == field) {
                return Err(SetError::UnknownAttribute { path: field.into() });
            }
            self.written.push(field.to_owned());
            Ok(())
        }

        fn set_id(&mut self, _id: &str) {}
    }

    const FIELDS: &[FieldSchema] = &[
        FieldSchema::string("status", "status"),
        FieldSchema::string("entropy_token", "entropy-token"),
        FieldSchema::int("self_test_period", "self-test-period"),
    ];

    fn raw(value: Value) -> RawObject {
        match value {
            Value::Object(map) => map,
            other => panic!("test fixture must be an object, got {other}"),
        }
    }

    fn record() -> NormalizedRecord {
        NormalizedRecord::new()
            .with("status", "enable")
            .with("entropy_token", "")
            .with("self_test_period", 1440_i64)
    }

    #[test]
    fn placeholder_exemption_values() {
        let p = PlaceholderExemption;
        assert!(p.is_exempt(None));
        assert!(p.is_exempt(Some(&json!(null))));
        assert!(p.is_exempt(Some(&json!(""))));
        assert!(p.is_exempt(Some(&json!([]))));
        assert!(p.is_exempt(Some(&json!([null]))));
        assert!(!p.is_exempt(Some(&json!("enable"))));
        assert!(!p.is_exempt(Some(&json!(0))));
        assert!(!p.is_exempt(Some(&json!([{ "ip": "10.0.0.1" }]))));
    }

    #[test]
    fn writes_in_declaration_order() {
        let mut dest = Picky::default();
        let raw = raw(json!({ "status": "enable", "entropy-token": "", "self-test-period": 1440 }));
        reconcile(&mut dest, FIELDS, &raw, &record(), &NeverExempt)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(dest.written, ["status", "entropy_token", "self_test_period"]);
    }

    #[test]
    fn exempt_rejection_is_swallowed() {
        let mut dest = Picky {
            reject: vec!["entropy_token"],
            ..Picky::default()
        };
        let raw = raw(json!({ "status": "enable", "entropy-token": "", "self-test-period": 1440 }));
        let result = reconcile(&mut dest, FIELDS, &raw, &record(), &PlaceholderExemption);
        assert!(result.is_ok(), "got {result:?}");
        assert_eq!(dest.written, ["status", "self_test_period"]);
    }

    #[test]
    fn non_exempt_rejection_stops_at_first_failure() {
        let mut dest = Picky {
            reject: vec!["entropy_token"],
            ..Picky::default()
        };
        let raw = raw(json!({ "status": "enable", "entropy-token": "enable" }));
        let record = NormalizedRecord::new()
            .with("status", "enable")
            .with("entropy_token", "enable")
            .with("self_test_period", 1440_i64);
        let err = reconcile(&mut dest, FIELDS, &raw, &record, &PlaceholderExemption).unwrap_err();
        match err {
            CoreError::FieldWrite { ref field, .. } => assert_eq!(field, "entropy_token"),
            other => panic!("expected FieldWrite, got {other:?}"),
        }
        assert_eq!(dest.written, ["status"]);
    }

    #[test]
    fn closure_exemption() {
        let mut dest = Picky {
            reject: vec!["status"],
            ..Picky::default()
        };
        let raw = raw(json!({ "status": "enable" }));
        let rec = NormalizedRecord::new().with("status", "enable");
        let allow_all = |_: Option<&Value>| true;
        assert!(reconcile(&mut dest, FIELDS, &raw, &rec, &allow_all).is_ok());
    }

    #[test]
    fn absent_fields_are_not_written() {
        let mut dest = Picky::default();
        let rec = NormalizedRecord::new().with("status", "disable");
        reconcile(&mut dest, FIELDS, &RawObject::new(), &rec, &NeverExempt)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(dest.written, ["status"]);
    }
}
