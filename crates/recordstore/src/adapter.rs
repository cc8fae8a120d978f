// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Record-level operations over a [`Table`].
//!
//! These functions hold no state between calls. Positions are 0-based
//! indexes into the record set returned by the most recent [`load_all`];
//! position `p` lives in table row `p + 2`.

use crate::error::{Operation, StoreError};
use crate::record::{Record, RecordSet};
use crate::schema::Schema;
use diagnostics::*;
use sheets::Table;
use std::collections::BTreeMap;

/// Make sure row 1 holds a header before anything else is read.
///
/// Returns the table contents as read. When the table is completely empty
/// the schema's header row is appended and the returned values contain
/// just that header. A table with any content is never rewritten, even if
/// its header differs from the schema.
pub fn ensure_headers<T: Table>(
    table: &T,
    schema: &Schema,
) -> Result<Vec<Vec<String>>, StoreError> {
    let mut values = table
        .get_all_values()
        .map_err(|e| StoreError::from_remote(e, Operation::Read))?;

    if values.is_empty() {
        let title = table.title();
        info!("Writing header row to empty worksheet {title}", title);
        let header = schema.header_row();
        table
            .append_row(&header)
            .map_err(|e| StoreError::from_remote(e, Operation::Write))?;
        values.push(header);
    }
    Ok(values)
}

/// Key a data row by the header; the first occurrence of a duplicated
/// header cell wins and short rows are padded with empty values.
fn materialize(header: &[String], row: &[String]) -> BTreeMap<String, String> {
    let mut keyed = BTreeMap::new();
    for (column, name) in header.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        let _ = keyed
            .entry(name.clone())
            .or_insert_with(|| row.get(column).cloned().unwrap_or_default());
    }
    keyed
}

/// Read every data row, projected onto the schema.
///
/// Columns not in the schema are dropped and schema fields missing from the
/// header read as empty. Every row below the header is a record, blank rows
/// included, so positions stay aligned with table rows.
pub fn load_all<T: Table>(table: &T, schema: &Schema) -> Result<RecordSet, StoreError> {
    let values = match ensure_headers(table, schema) {
        Ok(values) => values,
        Err(e) => {
            let cause = e.cause();
            error!("Failed to load records: {cause}", cause);
            return Err(e);
        }
    };

    let Some((header, rows)) = values.split_first() else {
        return Ok(RecordSet::new());
    };

    let records: RecordSet = rows
        .iter()
        .map(|row| schema.project(&materialize(header, row)))
        .collect();

    let count = records.len();
    debug!("Loaded {count} records", count);
    Ok(records)
}

/// Row values for a write, refusing a row with every cell empty.
///
/// The store does not report trailing blank rows, so an all-empty last row
/// would vanish from the next load and shift positions.
fn writable_row(schema: &Schema, record: &Record) -> Result<Vec<String>, StoreError> {
    let row = schema.to_row(record);
    if row.iter().all(String::is_empty) {
        warn!("Refusing to write a record with no values");
        return Err(StoreError::WriteFailed(
            "record has no values in any schema field".to_string(),
        ));
    }
    Ok(row)
}

/// Append `record` as a new last row.
///
/// Fields outside the schema are ignored and missing ones are written empty.
/// A record with no values in any schema field fails with `WriteFailed`.
pub fn append<T: Table>(table: &T, schema: &Schema, record: &Record) -> Result<(), StoreError> {
    let _ = ensure_headers(table, schema)?;

    let row = writable_row(schema, record)?;
    table.append_row(&row).map_err(|e| {
        let err = StoreError::from_remote(e, Operation::Write);
        let cause = err.cause();
        warn!("Append failed: {cause}", cause);
        err
    })?;

    debug!("Appended one record");
    Ok(())
}

/// Overwrite the row at `position` with one range write spanning every
/// schema column.
///
/// A record with no values in any schema field fails with `WriteFailed`
/// without touching the table.
pub fn update<T: Table>(
    table: &T,
    schema: &Schema,
    position: usize,
    record: &Record,
) -> Result<(), StoreError> {
    let range = schema.update_range(position);
    let row = writable_row(schema, record)?;
    debug!("Updating record range {range}", range);

    table.update_row(&range, &row).map_err(|e| {
        let err = StoreError::from_remote(e, Operation::Write);
        let cause = err.cause();
        warn!("Update of {range} failed: {cause}", range, cause);
        err
    })
}

/// Remove the row at `position`; later rows shift up by one.
pub fn delete<T: Table>(table: &T, position: usize) -> Result<(), StoreError> {
    let row_number = Schema::row_number(position);
    debug!("Deleting table row {row_number}", row_number);

    table.delete_row(row_number).map_err(|e| {
        let err = StoreError::from_remote(e, Operation::Delete);
        let cause = err.cause();
        warn!("Delete of row {row_number} failed: {cause}", row_number, cause);
        err
    })
}
