// ── Lookup keys ──
//
// Callers identify an object by its declared identifying field, which may
// arrive as a string (`name`) or a small integer (`seq-num`, `id`). The
// wire form is always a string.

use std::fmt;

use serde_json::Value;

use crate::error::CoreError;

/// Wire form of an object identifier plus optional tenancy scope (VDOM).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub key: String,
    /// `None` or empty means global scope.
    pub scope: Option<String>,
}

impl LookupKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            scope: None,
        }
    }

    /// Resolve a caller-supplied value into a key.
    pub fn resolve(value: &Value) -> Result<Self, CoreError> {
        resolve_key(value).map(Self::new)
    }

    #[must_use]
    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = (!scope.is_empty()).then_some(scope);
        self
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(ref scope) => write!(f, "{}@{scope}", self.key),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Coerce a raw identifier to its wire form.
///
/// Strings pass through verbatim and integers render as decimal. Anything
/// else, floats included, is a `LookupKeyType` error.
pub fn resolve_key(value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        other => Err(CoreError::LookupKeyType {
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
