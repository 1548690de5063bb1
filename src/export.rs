// src/export.rs
// JSON output writers. Record field order is fixed by the struct
// declaration and both map levels are BTreeMaps, so repeated runs over the
// same inputs produce byte-identical files. Consumers diff them.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::{Catalog, Diagnostic, diagnostic_messages};

pub fn write_catalog(path: &Path, catalog: &Catalog, indent: bool) -> Result<(), Box<dyn Error>> {
    write_json(path, catalog, indent)
}

/// Diagnostics serialize as their bare messages, already sorted by the
/// catalog builder.
pub fn write_diagnostics(
    path: &Path,
    diagnostics: &[Diagnostic],
    indent: bool,
) -> Result<(), Box<dyn Error>> {
    write_json(path, &diagnostic_messages(diagnostics), indent)
}

fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
    indent: bool,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    if indent {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
