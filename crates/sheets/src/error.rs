// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the remote row-store binding

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Not authorized (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Worksheet {wanted} not found; available worksheets: [{}]", available.join(", "))]
    WorksheetNotFound {
        wanted: String,
        available: Vec<String>,
    },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid spreadsheet locator: {0}")]
    InvalidLocator(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Response parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table cannot be reached at all
    #[error("Store offline: {0}")]
    Offline(String),
}

impl SheetsError {
    /// True when the remote side was never reached or refused the session,
    /// as opposed to a request that was accepted and then failed.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            SheetsError::Credentials(_)
                | SheetsError::Auth(_)
                | SheetsError::Transport(_)
                | SheetsError::Unauthorized { .. }
                | SheetsError::Url(_)
                | SheetsError::Offline(_)
        )
    }

    pub fn worksheet_not_found<S: Into<String>>(wanted: S, available: Vec<String>) -> Self {
        SheetsError::WorksheetNotFound {
            wanted: wanted.into(),
            available,
        }
    }
}

/// Result type for remote table operations
pub type Result<T> = std::result::Result<T, SheetsError>;
