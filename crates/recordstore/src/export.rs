// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! CSV export of a record set.

use crate::record::RecordSet;
use crate::schema::Schema;
use chrono::NaiveDate;
use std::io::Write;

/// Write a header row of schema fields followed by one row per record.
///
/// Returns the number of records written.
pub fn write_csv<W: Write>(
    schema: &Schema,
    records: &RecordSet,
    writer: W,
) -> Result<usize, csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(schema.fields())?;
    for record in records {
        wtr.write_record(schema.to_row(record))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// `amr_data_<YYYY-MM-DD>.csv`
#[must_use]
pub fn default_export_name(date: NaiveDate) -> String {
    format!("amr_data_{}.csv", date.format("%Y-%m-%d"))
}
