// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use chrono::NaiveDate;
use diagnostics::*;
use recordstore::{RecordSet, Schema};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Write `records` to `output`, or to `amr_data_<date>.csv` in the current
/// directory. Returns `None` when there is nothing to export.
pub fn export_records(
    schema: &Schema,
    records: &RecordSet,
    output: Option<&Path>,
    today: NaiveDate,
) -> Result<Option<(PathBuf, usize)>> {
    if records.is_empty() {
        return Ok(None);
    }

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(recordstore::default_export_name(today)));
    let display = path.display().to_string();
    debug!("Exporting records to {display}", display);

    let file = File::create(&path).with_context(|| format!("Failed to create {display}"))?;
    let count = recordstore::write_csv(schema, records, BufWriter::new(file))
        .with_context(|| format!("Failed to write {display}"))?;
    Ok(Some((path, count)))
}

pub fn export_command(
    schema: &Schema,
    records: &RecordSet,
    output: Option<&Path>,
    today: NaiveDate,
) -> Result<()> {
    match export_records(schema, records, output, today)? {
        Some((path, count)) => println!("✓ Exported {count} records to {}", path.display()),
        None => println!("No data to export"),
    }
    Ok(())
}
