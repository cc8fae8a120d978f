// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! A1 notation for cell ranges.
//!
//! Columns are bijective base-26: 1 is `A`, 26 is `Z`, 27 is `AA`,
//! 702 is `ZZ`, 703 is `AAA`. There is no zero digit, so each step
//! subtracts one before dividing.

/// Column identifier for a 1-based column number.
///
/// Column 0 does not exist; it is mapped to `A` rather than producing an
/// empty identifier.
pub fn column_letter(column: usize) -> String {
    let mut n = column.max(1);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Inverse of [`column_letter`]. Returns `None` for empty or non-letter input.
pub fn column_number(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0usize, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Range covering columns `1..=width` of a single 1-based row, e.g. `A2:R2`.
pub fn row_range(width: usize, row: usize) -> String {
    let last = column_letter(width);
    format!("A{row}:{last}{row}")
}

/// Prefix a range with a quoted sheet title, e.g. `'Sheet 1'!A2:R2`.
///
/// Single quotes inside the title are doubled.
pub fn qualify(title: &str, range: &str) -> String {
    let escaped = title.replace('\'', "''");
    format!("'{escaped}'!{range}")
}

/// A whole sheet addressed by title alone
pub fn whole_sheet(title: &str) -> String {
    let escaped = title.replace('\'', "''");
    format!("'{escaped}'")
}
