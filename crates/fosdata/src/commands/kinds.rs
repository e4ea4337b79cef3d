//! `kinds` command: list the registered object kinds.

use serde::Serialize;
use tabled::Tabled;

use fosdata_core::{ObjectSchema, registry};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct KindInfo {
    kind: &'static str,
    data_source: &'static str,
    path: &'static str,
    key_field: Option<&'static str>,
}

impl From<&ObjectSchema> for KindInfo {
    fn from(o: &ObjectSchema) -> Self {
        Self {
            kind: o.kind,
            data_source: o.data_source,
            path: o.path,
            key_field: o.key_field,
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct KindRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Data Source")]
    data_source: &'static str,
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Key")]
    key: &'static str,
}

impl From<&KindInfo> for KindRow {
    fn from(k: &KindInfo) -> Self {
        Self {
            kind: k.kind,
            data_source: k.data_source,
            path: k.path,
            key: k.key_field.unwrap_or("(singleton)"),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let kinds: Vec<KindInfo> = registry::all().iter().map(KindInfo::from).collect();
    let out = output::render_list(
        &global.output,
        &kinds,
        |k| KindRow::from(k),
        |k| k.kind.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
