// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Request and response bodies of the Sheets v4 REST API
//! (https://developers.google.com/sheets/api/reference/rest).

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SpreadsheetMetadata {
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// One row of text cells addressed to `range`
    pub fn single_row(range: Option<String>, row: &[String]) -> Self {
        Self {
            range,
            major_dimension: Some("ROWS".to_string()),
            values: vec![row.iter().cloned().map(Value::String).collect()],
        }
    }

    /// Cells as displayed text; numbers and booleans are stringified
    pub fn into_text_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `spreadsheets.batchUpdate` body carrying a single row deletion
#[derive(Serialize, Debug)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Value>,
}

impl BatchUpdateRequest {
    /// Delete 1-based `row_number` of sheet `sheet_id`
    pub fn delete_row(sheet_id: i64, row_number: usize) -> Self {
        let start = row_number.saturating_sub(1);
        Self {
            requests: vec![serde_json::json!({
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": start,
                        "endIndex": start + 1,
                    }
                }
            })],
        }
    }
}

/// Error envelope returned with non-2xx responses
#[derive(Deserialize, Debug)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
