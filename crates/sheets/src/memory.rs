// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory [`Table`] for tests and offline use.
//!
//! Mirrors what the spreadsheet API shows a client: trailing empty cells and
//! trailing empty rows are not returned, and appends land after the last
//! non-empty row. Every call is recorded so tests can count round trips, and
//! failures can be switched on to exercise error paths.

use crate::a1;
use crate::error::{Result, SheetsError};
use crate::table::Table;
use std::sync::Mutex;

/// One recorded call against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Read,
    Append(Vec<String>),
    Update { range: String, row: Vec<String> },
    Delete(usize),
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::Read)
    }
}

/// Injected failure behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Every call fails as if the store could not be reached
    Offline,
    /// Reads succeed, every mutating call is refused
    Rejecting,
}

pub struct MemoryTable {
    title: String,
    rows: Mutex<Vec<Vec<String>>>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<FailureMode>>,
}

impl MemoryTable {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self::with_rows(title, Vec::new())
    }

    /// A table pre-populated with `rows` (header included)
    pub fn with_rows<S: Into<String>>(title: S, rows: Vec<Vec<String>>) -> Self {
        Self {
            title: title.into(),
            rows: Mutex::new(rows),
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn set_failure(&self, mode: Option<FailureMode>) {
        *lock(&self.failure) = mode;
    }

    /// Raw contents, including any trailing empty cells
    pub fn rows(&self) -> Vec<Vec<String>> {
        lock(&self.rows).clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn write_count(&self) -> usize {
        lock(&self.calls).iter().filter(|c| c.is_write()).count()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn check(&self, call: &Call) -> Result<()> {
        match *lock(&self.failure) {
            Some(FailureMode::Offline) => Err(SheetsError::Offline(format!(
                "table '{}' is unreachable",
                self.title
            ))),
            Some(FailureMode::Rejecting) if call.is_write() => Err(SheetsError::Api {
                status: 403,
                message: format!("write to '{}' refused", self.title),
            }),
            _ => Ok(()),
        }
    }

    fn record(&self, call: Call) -> Result<()> {
        self.check(&call)?;
        lock(&self.calls).push(call);
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.is_empty())
}

fn trim_row(row: &[String]) -> Vec<String> {
    let len = row.iter().rposition(|c| !c.is_empty()).map_or(0, |i| i + 1);
    row[..len].to_vec()
}

fn used_rows(rows: &[Vec<String>]) -> usize {
    rows.iter().rposition(|r| !is_blank(r)).map_or(0, |i| i + 1)
}

/// Split a single-row range like `'Sheet'!A2:R2` into (row, first col, last col)
fn parse_row_range(range: &str) -> Option<(usize, usize, usize)> {
    let cells = range.rsplit('!').next()?;
    let (start, end) = cells.split_once(':').unwrap_or((cells, cells));

    let split = |cell: &str| -> Option<(usize, usize)> {
        let at = cell.find(|c: char| c.is_ascii_digit())?;
        let column = a1::column_number(&cell[..at])?;
        let row = cell[at..].parse().ok()?;
        Some((row, column))
    };

    let (row, first) = split(start)?;
    let (end_row, last) = split(end)?;
    if row != end_row || row == 0 || first > last {
        return None;
    }
    Some((row, first, last))
}

impl Table for MemoryTable {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
        self.record(Call::Read)?;
        let rows = lock(&self.rows);
        let used = used_rows(&rows);
        Ok(rows[..used].iter().map(|r| trim_row(r)).collect())
    }

    fn append_row(&self, row: &[String]) -> Result<()> {
        self.record(Call::Append(row.to_vec()))?;
        let mut rows = lock(&self.rows);
        let used = used_rows(&rows);
        rows.truncate(used);
        rows.push(row.to_vec());
        Ok(())
    }

    fn update_row(&self, range: &str, row: &[String]) -> Result<()> {
        let (row_number, first, last) = parse_row_range(range).ok_or_else(|| SheetsError::Api {
            status: 400,
            message: format!("unable to parse range: {range}"),
        })?;
        if last - first + 1 != row.len() {
            return Err(SheetsError::Api {
                status: 400,
                message: format!(
                    "range {range} has {} columns but {} values were supplied",
                    last - first + 1,
                    row.len()
                ),
            });
        }
        self.record(Call::Update {
            range: range.to_string(),
            row: row.to_vec(),
        })?;

        let mut rows = lock(&self.rows);
        if rows.len() < row_number {
            rows.resize(row_number, Vec::new());
        }
        let target = &mut rows[row_number - 1];
        if target.len() < last {
            target.resize(last, String::new());
        }
        for (offset, value) in row.iter().enumerate() {
            target[first - 1 + offset] = value.clone();
        }
        Ok(())
    }

    fn delete_row(&self, row_number: usize) -> Result<()> {
        self.record(Call::Delete(row_number))?;
        let mut rows = lock(&self.rows);
        if row_number == 0 || row_number > rows.len() {
            return Err(SheetsError::Api {
                status: 400,
                message: format!("row {row_number} is outside the table"),
            });
        }
        let _ = rows.remove(row_number - 1);
        Ok(())
    }
}
