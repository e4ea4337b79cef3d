// ── Declared field schemas ──
//
// Every object kind is described by a `'static` table of `FieldSchema`
// entries. The flattener, reconciler, and attribute store are all driven
// by these tables; nothing is hand-written per kind.

use strum::{AsRefStr, Display, IntoStaticStr};

/// Shape of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    String,
    Int,
    Bool,
    /// Ordered sequence of nested records described by the child table.
    List(&'static [FieldSchema]),
}

/// One declared field of an object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Attribute name in the destination store (`fabric_object`).
    pub name: &'static str,
    /// Key in the appliance's answer (`fabric-object`).
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FieldSchema {
    pub const fn string(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::String,
        }
    }

    pub const fn int(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::Int,
        }
    }

    pub const fn bool(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::Bool,
        }
    }

    pub const fn list(
        name: &'static str,
        key: &'static str,
        children: &'static [FieldSchema],
    ) -> Self {
        Self {
            name,
            key,
            kind: FieldKind::List(children),
        }
    }

    /// Child table for list fields.
    pub fn children(&self) -> Option<&'static [FieldSchema]> {
        match self.kind {
            FieldKind::List(children) => Some(children),
            FieldKind::String | FieldKind::Int | FieldKind::Bool => None,
        }
    }
}

/// Find a declared field by its destination name.
pub fn find_field<'a>(fields: &'a [FieldSchema], name: &str) -> Option<&'a FieldSchema> {
    fields.iter().find(|f| f.name == name)
}

/// Full description of one appliance object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Kind name, e.g. `FirewallServiceCategory`.
    pub kind: &'static str,
    /// Data source name exposed to the IaC tool.
    pub data_source: &'static str,
    /// CMDB path, `section.sub/table`.
    pub path: &'static str,
    /// Destination name of the identifying field. `None` for singleton
    /// settings objects, which are read without a key.
    pub key_field: Option<&'static str>,
    pub fields: &'static [FieldSchema],
}

impl ObjectSchema {
    pub fn is_singleton(&self) -> bool {
        self.key_field.is_none()
    }

    /// The declared identifying field, if any.
    pub fn key_schema(&self) -> Option<&'static FieldSchema> {
        self.key_field.and_then(|name| find_field(self.fields, name))
    }
}
