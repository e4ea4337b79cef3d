// ── In-memory attribute store ──
//
// A schema-checked `Destination`, standing in for the IaC runtime's state.
// Writes are validated against the store's own field table, which may lag
// behind the projector's (older provider schema, newer firmware).

use indexmap::IndexMap;
use serde_json::Value;

use crate::model::{FieldValue, NormalizedRecord, Scalar, attribute_path};
use crate::reconcile::{Destination, SetError};
use crate::schema::{FieldKind, FieldSchema, ObjectSchema, find_field};

#[derive(Debug, Clone)]
pub struct AttributeStore {
    fields: &'static [FieldSchema],
    id: String,
    values: IndexMap<String, FieldValue>,
}

impl AttributeStore {
    pub fn new(fields: &'static [FieldSchema]) -> Self {
        Self {
            fields,
            id: String::new(),
            values: IndexMap::new(),
        }
    }

    pub fn for_object(schema: &ObjectSchema) -> Self {
        Self::new(schema.fields)
    }

    /// Current identity; empty when unset or cleared.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a positional path such as `neighbor.0.ip`.
    pub fn get_path(&self, path: &str) -> Option<&FieldValue> {
        let (head, rest) = path.split_once('.').unwrap_or((path, ""));
        let value = self.values.get(head)?;
        if rest.is_empty() {
            return Some(value);
        }
        let (index, tail) = rest.split_once('.')?;
        let record = value.as_list()?.get(index.parse::<usize>().ok()?)?;
        record.get_path(tail)
    }

    /// Snapshot of the written attributes as a record.
    pub fn to_record(&self) -> NormalizedRecord {
        let mut record = NormalizedRecord::new();
        for (name, value) in &self.values {
            record.insert(name.clone(), value.clone());
        }
        record
    }

    pub fn to_json(&self) -> Value {
        self.to_record().to_json()
    }
}

impl Destination for AttributeStore {
    fn set(&mut self, field: &str, value: &FieldValue) -> Result<(), SetError> {
        let schema = find_field(self.fields, field).ok_or_else(|| SetError::UnknownAttribute {
            path: field.to_owned(),
        })?;
        check_value(schema.kind, value, field)?;
        self.values.insert(field.to_owned(), value.clone());
        Ok(())
    }

    fn set_id(&mut self, id: &str) {
        id.clone_into(&mut self.id);
    }
}

/// Validate `value` against `kind`, reporting the positional path of the
/// first offending attribute.
fn check_value(kind: FieldKind, value: &FieldValue, path: &str) -> Result<(), SetError> {
    let matches = match (kind, value) {
        (FieldKind::String, FieldValue::Scalar(Scalar::String(_)))
        | (FieldKind::Int, FieldValue::Scalar(Scalar::Int(_)))
        | (FieldKind::Bool, FieldValue::Scalar(Scalar::Bool(_))) => true,
        (FieldKind::List(children), FieldValue::List(items)) => {
            for (index, item) in items.iter().enumerate() {
                for (name, nested) in item.iter() {
                    let nested_path = attribute_path(path, index, name);
                    let child = find_field(children, name)
                        .ok_or_else(|| SetError::UnknownAttribute {
                            path: nested_path.clone(),
                        })?;
                    check_value(child.kind, nested, &nested_path)?;
                }
            }
            true
        }
        _ => false,
    };

    if matches {
        Ok(())
    } else {
        Err(SetError::TypeMismatch {
            path: path.to_owned(),
            expected: kind.into(),
            got: value.type_name(),
        })
    }
}
