// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Spreadsheet locators: either a bare key or a document URL of the form
//! `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.

use crate::error::{Result, SheetsError};
use url::Url;

/// Extract the spreadsheet key from a locator.
pub fn spreadsheet_id(locator: &str) -> Result<String> {
    let locator = locator.trim();
    if locator.is_empty() {
        return Err(SheetsError::InvalidLocator("empty locator".to_string()));
    }

    if !locator.contains("://") {
        if locator.contains('/') {
            return Err(SheetsError::InvalidLocator(format!(
                "'{locator}' is neither a spreadsheet id nor a URL"
            )));
        }
        return Ok(locator.to_string());
    }

    let url = Url::parse(locator)?;
    let mut segments = url
        .path_segments()
        .ok_or_else(|| SheetsError::InvalidLocator(format!("'{locator}' has no path")))?;

    while let Some(segment) = segments.next() {
        if segment == "d" {
            return match segments.next() {
                Some(id) if !id.is_empty() => Ok(id.to_string()),
                _ => Err(SheetsError::InvalidLocator(format!(
                    "'{locator}' has an empty /d/ segment"
                ))),
            };
        }
    }

    Err(SheetsError::InvalidLocator(format!(
        "'{locator}' does not contain a /d/<id>/ segment"
    )))
}
