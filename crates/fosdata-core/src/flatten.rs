// ── Raw object -> NormalizedRecord ──
//
// Schema-driven, recursive, and total: malformed or missing data degrades to
// an absent field or an empty list, never to an error.

use serde_json::Value;

use fosdata_api::RawObject;

use crate::model::{FieldValue, NormalizedRecord, Scalar};
use crate::schema::{FieldKind, FieldSchema};

/// Flatten one raw object against a declared field table.
///
/// Output keys follow declaration order. External keys the table does not
/// declare are dropped; declared keys the object lacks are omitted.
pub fn flatten(fields: &[FieldSchema], raw: &RawObject) -> NormalizedRecord {
    let mut record = NormalizedRecord::new();
    for field in fields {
        if let Some(value) = raw.get(field.key).and_then(|v| flatten_value(field.kind, v)) {
            record.insert(field.name, value);
        }
    }
    record
}

/// Flatten a single raw value. `None` means the field is absent.
pub fn flatten_value(kind: FieldKind, raw: &Value) -> Option<FieldValue> {
    match kind {
        FieldKind::String => coerce_string(raw).map(|s| FieldValue::Scalar(Scalar::String(s))),
        FieldKind::Int => coerce_int(raw).map(|i| FieldValue::Scalar(Scalar::Int(i))),
        FieldKind::Bool => coerce_bool(raw).map(|b| FieldValue::Scalar(Scalar::Bool(b))),
        FieldKind::List(children) => Some(FieldValue::List(flatten_list(children, raw))),
    }
}

/// Flatten a list-of-objects value, preserving source order.
///
/// `null`, an empty array, an array whose first element is `null`, or any
/// non-object element all collapse to an empty list.
// TODO: check live API captures to confirm `[null]` is an empty-table
// sentinel and not a server bug.
pub fn flatten_list(children: &[FieldSchema], raw: &Value) -> Vec<NormalizedRecord> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };
    if items.first().is_none_or(Value::is_null) {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(obj) = item else {
            return Vec::new();
        };
        out.push(flatten(children, obj));
    }
    out
}

fn coerce_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn coerce_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "enable" | "true" => Some(true),
            "disable" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
