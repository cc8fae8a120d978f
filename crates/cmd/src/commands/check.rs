// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::common::CollectorContext;
use anyhow::Result;
use recordstore::{Schema, adapter};
use sheets::Table;

/// Schema fields absent from the header, and header cells outside the schema
pub fn header_differences(schema: &Schema, header: &[String]) -> (Vec<String>, Vec<String>) {
    let missing = schema
        .fields()
        .iter()
        .filter(|field| !header.contains(*field))
        .cloned()
        .collect();
    let extra = header
        .iter()
        .filter(|cell| !cell.is_empty() && !schema.contains(cell))
        .cloned()
        .collect();
    (missing, extra)
}

/// Connect, bootstrap the header if needed and report what was found
pub fn check_command(ctx: &CollectorContext) -> Result<()> {
    let worksheet = ctx.config.open_worksheet()?;
    let values = adapter::ensure_headers(&worksheet, &ctx.schema)?;
    let header = values.first().cloned().unwrap_or_default();
    let (missing, extra) = header_differences(&ctx.schema, &header);

    println!("✓ Connected to worksheet '{}'", worksheet.title());
    println!("  Records: {}", values.len().saturating_sub(1));
    println!("  Schema fields: {}", ctx.schema.width());
    if !missing.is_empty() {
        println!("  Missing from header (read as empty): {}", missing.join(", "));
    }
    if !extra.is_empty() {
        println!("  Ignored header columns: {}", extra.join(", "));
    }
    Ok(())
}
