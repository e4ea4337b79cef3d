//! `read` command: project one appliance object into an attribute store.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use fosdata_core::model::attribute_path;
use fosdata_core::{
    AttributeStore, FieldKind, FieldValue, NormalizedRecord, ObjectSchema, Projector,
    ReadOutcome,
};

use crate::cli::{GlobalOpts, ReadArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Output shape ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ReadResult<'a> {
    kind: &'static str,
    id: &'a str,
    attributes: NormalizedRecord,
}

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Attribute")]
    path: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// One row per scalar; list entries expand to `name.index.field` paths.
fn attribute_rows(record: &NormalizedRecord, rows: &mut Vec<AttributeRow>) {
    for (name, value) in record {
        push_rows(name.clone(), value, rows);
    }
}

fn push_rows(path: String, value: &FieldValue, rows: &mut Vec<AttributeRow>) {
    match value {
        FieldValue::Scalar(scalar) => rows.push(AttributeRow {
            path,
            value: scalar.to_string(),
        }),
        FieldValue::List(items) if items.is_empty() => rows.push(AttributeRow {
            path,
            value: "[]".into(),
        }),
        FieldValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                for (field, nested) in item {
                    push_rows(attribute_path(&path, index, field), nested, rows);
                }
            }
        }
    }
}

fn render_detail(result: &ReadResult<'_>) -> String {
    let mut rows = vec![AttributeRow {
        path: "id".into(),
        value: result.id.to_owned(),
    }];
    attribute_rows(&result.attributes, &mut rows);
    output::render_table(&rows)
}

// ── Key parsing ─────────────────────────────────────────────────────

/// Turn a command-line key into the JSON value the projector resolves.
/// Integer-keyed kinds get a number when the text parses as one.
fn key_value(object: &ObjectSchema, raw: &str) -> Value {
    match object.key_schema().map(|f| f.kind) {
        Some(FieldKind::Int) => raw
            .parse::<i64>()
            .map_or_else(|_| Value::String(raw.to_owned()), Value::from),
        _ => Value::String(raw.to_owned()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ReadArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let object = fosdata_core::registry::lookup(&args.kind).ok_or_else(|| {
        CliError::UnknownKind {
            kind: args.kind.clone(),
        }
    })?;
    let key = args.key.as_deref().map(|raw| key_value(object, raw));

    let (appliance, profile_name) = config::resolve_appliance(global)?;
    tracing::debug!(
        profile = %profile_name,
        url = %appliance.url,
        vdom = ?appliance.vdom,
        "resolved appliance"
    );
    let projector = Projector::connect(&appliance)
        .map_err(|e| CliError::from_core(&e, &profile_name))?;

    let mut store = AttributeStore::for_object(object);
    let outcome = projector
        .describe(object, key.as_ref(), None, &mut store)
        .await
        .map_err(|e| CliError::from_core(&e, &profile_name))?;

    if outcome == ReadOutcome::NotFound {
        return Err(CliError::NotFound {
            kind: object.kind.into(),
            key: args.key.unwrap_or_else(|| object.kind.into()),
        });
    }

    let result = ReadResult {
        kind: object.kind,
        id: store.id(),
        attributes: store.to_record(),
    };
    let out = output::render_single(&global.output, &result, render_detail, |r| {
        r.id.to_owned()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
