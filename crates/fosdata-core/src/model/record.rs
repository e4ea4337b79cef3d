use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::model::value::{FieldValue, Scalar};

/// Positional path of a nested attribute: `{pre}.{index}.{field}`.
///
/// `attribute_path("neighbor", 0, "ip")` is `neighbor.0.ip`, the same form
/// IaC state uses to address list elements.
pub fn attribute_path(pre: &str, index: usize, field: &str) -> String {
    format!("{pre}.{index}.{field}")
}

/// Output of flattening one raw object.
///
/// Keys are declared field names in schema declaration order. A field is
/// present only if the appliance sent it; nothing is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord(IndexMap<String, FieldValue>);

impl NormalizedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing expected records.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve a positional path such as `neighbor.0.ip`.
    ///
    /// Paths alternate field names and list indices. A path that stops at an
    /// index (`neighbor.0`) names a record rather than a value and yields `None`.
    pub fn get_path(&self, path: &str) -> Option<&FieldValue> {
        let mut segments = path.split('.');
        let mut value = self.get(segments.next()?)?;
        while let Some(index) = segments.next() {
            let items = value.as_list()?;
            let record = items.get(index.parse::<usize>().ok()?)?;
            value = record.get(segments.next()?)?;
        }
        Some(value)
    }

    /// Render as a JSON object, preserving field order.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), field_value_to_json(v)))
                .collect(),
        )
    }
}

fn field_value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Scalar(Scalar::String(s)) => Value::String(s.clone()),
        FieldValue::Scalar(Scalar::Int(i)) => Value::from(*i),
        FieldValue::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
        FieldValue::List(items) => {
            Value::Array(items.iter().map(NormalizedRecord::to_json).collect())
        }
    }
}

impl<'a> IntoIterator for &'a NormalizedRecord {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = indexmap::map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
