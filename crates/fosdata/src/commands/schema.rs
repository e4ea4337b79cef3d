//! `schema` command: show the declared field table of one kind.

use serde::Serialize;
use tabled::Tabled;

use fosdata_core::{FieldSchema, registry};

use crate::cli::{GlobalOpts, SchemaArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct FieldInfo {
    name: &'static str,
    key: &'static str,
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldInfo>,
}

impl From<&FieldSchema> for FieldInfo {
    fn from(f: &FieldSchema) -> Self {
        Self {
            name: f.name,
            key: f.key,
            kind: f.kind.to_string(),
            fields: f
                .children()
                .map(|children| children.iter().map(FieldInfo::from).collect())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Attribute")]
    path: String,
    #[tabled(rename = "API Key")]
    key: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
}

/// Nested fields appear as `parent.*.child`.
fn field_rows(fields: &[FieldInfo], prefix: &str, rows: &mut Vec<FieldRow>) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_owned()
        } else {
            format!("{prefix}.*.{}", field.name)
        };
        rows.push(FieldRow {
            path: path.clone(),
            key: field.key,
            kind: field.kind.clone(),
        });
        field_rows(&field.fields, &path, rows);
    }
}

pub fn handle(args: &SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let object = registry::lookup(&args.kind).ok_or_else(|| CliError::UnknownKind {
        kind: args.kind.clone(),
    })?;
    let fields: Vec<FieldInfo> = object.fields.iter().map(FieldInfo::from).collect();

    let out = output::render_single(
        &global.output,
        &fields,
        |fields| {
            let mut rows = Vec::new();
            field_rows(fields, "", &mut rows);
            output::render_table(&rows)
        },
        |fields| {
            fields
                .iter()
                .map(|f| f.name)
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
