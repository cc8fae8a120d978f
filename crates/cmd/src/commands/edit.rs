// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Record mutations: add, edit and delete.
//!
//! Each command works on a freshly loaded session, so the record numbers
//! the user types refer to the listing they would see right now.

use crate::common::position_of;
use anyhow::Result;
use chrono::NaiveDateTime;
use diagnostics::*;
use recordstore::{Form, Record, Session};
use sheets::Table;
use std::collections::BTreeMap;

/// Fill a new record from defaults plus `inputs` and append it.
///
/// Returns the saved record.
pub fn add_record<T: Table>(
    session: &mut Session<T>,
    form: &Form,
    inputs: &BTreeMap<String, String>,
    now: NaiveDateTime,
) -> Result<Record> {
    let record = form.fill(None, inputs, now)?;
    session.begin_new();
    session.submit(&record)?;
    Ok(record)
}

/// Apply `inputs` on top of record `number` (1-based) and save it
pub fn edit_record<T: Table>(
    session: &mut Session<T>,
    form: &Form,
    number: usize,
    inputs: &BTreeMap<String, String>,
    now: NaiveDateTime,
) -> Result<Record> {
    let position = position_of(number)?;
    let existing = session.begin_edit(position)?.clone();
    let record = match form.fill(Some(&existing), inputs, now) {
        Ok(record) => record,
        Err(e) => {
            session.cancel();
            return Err(e.into());
        }
    };
    session.submit(&record)?;
    Ok(record)
}

/// Delete record `number` (1-based) from the table
pub fn delete_record<T: Table>(session: &mut Session<T>, number: usize) -> Result<Record> {
    let position = position_of(number)?;
    let record = session.begin_edit(position).cloned()?;
    session.cancel();
    session.remove(position)?;
    info!("Deleted record {number}", number);
    Ok(record)
}

fn summary(record: &Record) -> String {
    ["Age", "Gender", "Species", "Setting"]
        .iter()
        .map(|f| record.get(f))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn add_command<T: Table>(
    session: &mut Session<T>,
    form: &Form,
    inputs: &BTreeMap<String, String>,
    now: NaiveDateTime,
) -> Result<()> {
    let record = add_record(session, form, inputs, now)?;
    println!(
        "✓ Added record #{}: {}",
        session.records().len(),
        summary(&record)
    );
    if session.is_stale() {
        println!("  Warning: reload failed; run 'amr list' to refresh");
    }
    Ok(())
}

pub fn edit_command<T: Table>(
    session: &mut Session<T>,
    form: &Form,
    number: usize,
    inputs: &BTreeMap<String, String>,
    now: NaiveDateTime,
) -> Result<()> {
    let record = edit_record(session, form, number, inputs, now)?;
    println!("✓ Updated record #{number}: {}", summary(&record));
    Ok(())
}

pub fn delete_command<T: Table>(session: &mut Session<T>, number: usize) -> Result<()> {
    let record = delete_record(session, number)?;
    println!("✓ Deleted record #{number}: {}", summary(&record));
    println!("  {} records remain", session.records().len());
    Ok(())
}
