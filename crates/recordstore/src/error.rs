// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy of the record store.
//!
//! Remote failures never escape as transport errors: every adapter call
//! reports one of the [`StoreError`] variants, whose Display text is the
//! cause shown to the user.

use sheets::SheetsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Authentication or connection failure; nothing was changed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Spreadsheet not found: {0}")]
    TableNotFound(String),

    #[error("Worksheet {wanted} not found; available worksheets: [{}]", available.join(", "))]
    WorksheetNotFound {
        wanted: String,
        available: Vec<String>,
    },

    /// The store was reached but refused or failed the write
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// The store was reached but refused or failed the delete
    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// Position no longer (or never) addresses a row of the current record set
    #[error("Record position {position} is stale: {reason}")]
    StalePosition { position: usize, reason: String },

    #[error("No record is being edited")]
    NotEditing,
}

/// Which kind of remote call failed, for classifying non-connection errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Read,
    Write,
    Delete,
}

impl StoreError {
    pub(crate) fn from_remote(err: SheetsError, op: Operation) -> Self {
        match err {
            SheetsError::SpreadsheetNotFound(id) => StoreError::TableNotFound(id),
            SheetsError::InvalidLocator(msg) => StoreError::TableNotFound(msg),
            SheetsError::WorksheetNotFound { wanted, available } => {
                StoreError::WorksheetNotFound { wanted, available }
            }
            err if err.is_connection_failure() => StoreError::StoreUnavailable(err.to_string()),
            err => match op {
                Operation::Read => StoreError::StoreUnavailable(err.to_string()),
                Operation::Write => StoreError::WriteFailed(err.to_string()),
                Operation::Delete => StoreError::DeleteFailed(err.to_string()),
            },
        }
    }

    /// Errors from connecting or resolving the worksheet
    pub fn from_open(err: SheetsError) -> Self {
        Self::from_remote(err, Operation::Read)
    }

    pub fn stale<S: Into<String>>(position: usize, reason: S) -> Self {
        StoreError::StalePosition {
            position,
            reason: reason.into(),
        }
    }

    /// Human-readable cause, never empty
    pub fn cause(&self) -> String {
        self.to_string()
    }
}

/// Invalid field schema
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Schema has no fields")]
    Empty,

    #[error("Schema field {0} has a blank name")]
    BlankField(usize),

    #[error("Schema field '{0}' appears more than once")]
    Duplicate(String),
}

/// Rejected form input
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Field '{0}' is set automatically")]
    ReadOnly(String),

    #[error("Field '{field}': '{value}' is not a whole number")]
    InvalidNumber { field: String, value: String },

    #[error("Field '{field}': {value} is outside {min}..={max}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Field '{field}': '{value}' is not one of [{}]", options.join(", "))]
    InvalidChoice {
        field: String,
        value: String,
        options: Vec<String>,
    },

    #[error("Field '{field}': '{value}' is not 0/1 (or yes/no)")]
    InvalidFlag { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failures_are_unavailable() {
        for op in [Operation::Read, Operation::Write, Operation::Delete] {
            let err = StoreError::from_remote(SheetsError::Offline("down".to_string()), op);
            assert!(matches!(err, StoreError::StoreUnavailable(_)));
        }
    }

    #[test]
    fn test_api_errors_follow_operation() {
        let api = || SheetsError::Api {
            status: 403,
            message: "denied".to_string(),
        };
        assert!(matches!(
            StoreError::from_remote(api(), Operation::Write),
            StoreError::WriteFailed(_)
        ));
        assert!(matches!(
            StoreError::from_remote(api(), Operation::Delete),
            StoreError::DeleteFailed(_)
        ));
        assert!(matches!(
            StoreError::from_remote(api(), Operation::Read),
            StoreError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn test_not_found_mapping() {
        let err = StoreError::from_open(SheetsError::worksheet_not_found(
            "#3",
            vec!["Sheet1".to_string(), "Archive".to_string()],
        ));
        assert_eq!(
            err.cause(),
            "Worksheet #3 not found; available worksheets: [Sheet1, Archive]"
        );

        let err = StoreError::from_open(SheetsError::SpreadsheetNotFound("abc".to_string()));
        assert!(matches!(err, StoreError::TableNotFound(_)));
    }
}
