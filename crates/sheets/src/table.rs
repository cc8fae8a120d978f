// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Result;

/// A row-oriented remote table.
///
/// Rows and columns are 1-based as in the spreadsheet UI. Cells are
/// exchanged as their displayed text. Every call is a blocking round trip.
pub trait Table {
    /// Human-readable name used in log lines and error messages
    fn title(&self) -> String;

    /// Every row currently in the table, header included, in row order.
    /// Trailing empty cells may be omitted, so rows can be ragged.
    fn get_all_values(&self) -> Result<Vec<Vec<String>>>;

    /// Add a row after the last non-empty row
    fn append_row(&self, row: &[String]) -> Result<()>;

    /// Overwrite the cells of `range` (A1 notation, one row) in a single write
    fn update_row(&self, range: &str, row: &[String]) -> Result<()>;

    /// Remove row `row_number`, shifting later rows up by one
    fn delete_row(&self, row_number: usize) -> Result<()>;
}

impl<T: Table + ?Sized> Table for &T {
    fn title(&self) -> String {
        (**self).title()
    }

    fn get_all_values(&self) -> Result<Vec<Vec<String>>> {
        (**self).get_all_values()
    }

    fn append_row(&self, row: &[String]) -> Result<()> {
        (**self).append_row(row)
    }

    fn update_row(&self, range: &str, row: &[String]) -> Result<()> {
        (**self).update_row(range, row)
    }

    fn delete_row(&self, row_number: usize) -> Result<()> {
        (**self).delete_row(row_number)
    }
}
