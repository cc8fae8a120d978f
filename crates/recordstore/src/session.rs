// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Interactive session state.
//!
//! A [`Session`] owns the record set last loaded from its table and the
//! current edit target. Positions handed to it are only valid against that
//! record set: every remote mutation is followed by a reload, and a failed
//! reload leaves the session stale until the next successful [`Session::sync`].

use crate::adapter;
use crate::error::StoreError;
use crate::export;
use crate::record::{Record, RecordSet};
use crate::schema::Schema;
use diagnostics::*;
use sheets::Table;
use std::io::Write;

/// What a submitted form will do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditTarget {
    #[default]
    Idle,
    New,
    Existing(usize),
}

pub struct Session<T: Table> {
    table: T,
    schema: Schema,
    records: RecordSet,
    edit: EditTarget,
    stale: bool,
}

impl<T: Table> Session<T> {
    /// A session that has not loaded anything yet
    pub fn new(table: T, schema: Schema) -> Self {
        Self {
            table,
            schema,
            records: RecordSet::new(),
            edit: EditTarget::Idle,
            stale: true,
        }
    }

    /// Create a session and load the record set
    pub fn open(table: T, schema: Schema) -> Result<Self, StoreError> {
        let mut session = Self::new(table, schema);
        let _ = session.sync()?;
        Ok(session)
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn edit_target(&self) -> EditTarget {
        self.edit
    }

    /// True when positions may no longer match the table
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Reload the record set from the table.
    ///
    /// On failure the previous record set is kept unchanged.
    pub fn sync(&mut self) -> Result<usize, StoreError> {
        let records = adapter::load_all(&self.table, &self.schema)?;
        self.records = records;
        self.stale = false;
        Ok(self.records.len())
    }

    fn check_position(&self, position: usize) -> Result<(), StoreError> {
        if self.stale {
            return Err(StoreError::stale(
                position,
                "records changed since the last load; reload first",
            ));
        }
        if position >= self.records.len() {
            let count = self.records.len();
            return Err(StoreError::stale(
                position,
                format!("only {count} records are loaded"),
            ));
        }
        Ok(())
    }

    /// Reload after a successful mutation. A failed reload is logged and
    /// leaves the session stale; the mutation itself still succeeded.
    fn reload_after(&mut self, what: &str) {
        self.stale = true;
        match self.sync() {
            Ok(count) => info!("Reloaded {count} records after {what}", count, what),
            Err(e) => {
                let cause = e.cause();
                warn!("Reload after {what} failed, session is stale: {cause}", what, cause);
            }
        }
    }

    /// Append a record to the table
    pub fn add(&mut self, record: &Record) -> Result<(), StoreError> {
        adapter::append(&self.table, &self.schema, record)?;
        self.reload_after("add");
        Ok(())
    }

    /// Overwrite the record at `position`
    pub fn save(&mut self, position: usize, record: &Record) -> Result<(), StoreError> {
        self.check_position(position)?;
        adapter::update(&self.table, &self.schema, position, record)?;
        self.reload_after("save");
        Ok(())
    }

    /// Delete the record at `position` from the table
    pub fn remove(&mut self, position: usize) -> Result<(), StoreError> {
        self.check_position(position)?;
        adapter::delete(&self.table, position)?;
        self.reload_after("delete");
        Ok(())
    }

    /// Drop a record from the local set without touching the table.
    ///
    /// Works while the table is unreachable and may be repeated: only the
    /// local record set is consulted. Local positions no longer match table
    /// rows afterwards, so remote positional calls are refused until the
    /// next sync.
    pub fn remove_local(&mut self, position: usize) -> Result<Record, StoreError> {
        let count = self.records.len();
        let record = self.records.remove(position).ok_or_else(|| {
            StoreError::stale(position, format!("only {count} records are loaded"))
        })?;
        self.stale = true;
        self.edit = EditTarget::Idle;
        Ok(record)
    }

    pub fn begin_new(&mut self) {
        self.edit = EditTarget::New;
    }

    /// Start editing the record at `position`, returning its current values
    pub fn begin_edit(&mut self, position: usize) -> Result<&Record, StoreError> {
        self.check_position(position)?;
        self.edit = EditTarget::Existing(position);
        self.records
            .get(position)
            .ok_or_else(|| StoreError::stale(position, "record vanished"))
    }

    /// The record being edited, if the target is an existing one
    pub fn editing_record(&self) -> Option<&Record> {
        match self.edit {
            EditTarget::Existing(position) => self.records.get(position),
            EditTarget::Idle | EditTarget::New => None,
        }
    }

    pub fn cancel(&mut self) {
        self.edit = EditTarget::Idle;
    }

    /// Persist a filled form according to the edit target.
    ///
    /// The target returns to idle only when the write succeeds.
    pub fn submit(&mut self, record: &Record) -> Result<(), StoreError> {
        match self.edit {
            EditTarget::Idle => return Err(StoreError::NotEditing),
            EditTarget::New => self.add(record)?,
            EditTarget::Existing(position) => self.save(position, record)?,
        }
        self.edit = EditTarget::Idle;
        Ok(())
    }

    /// Write the current record set as CSV, returning the record count
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, csv::Error> {
        export::write_csv(&self.schema, &self.records, writer)
    }
}
