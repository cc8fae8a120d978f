// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The ordered field schema and its projection onto table rows.

use crate::error::SchemaError;
use crate::record::Record;
use sheets::a1;
use std::collections::{BTreeMap, HashSet};

/// Fields of an AMR patient record, in column order
pub const AMR_FIELDS: [&str; 18] = [
    "Age",
    "Gender",
    "Species",
    "Rectal_CPE_Pos",
    "Setting",
    "Acquisition",
    "BSI_Source",
    "CHF",
    "CKD",
    "Tumor",
    "Diabetes",
    "Immunosuppressed",
    "CR",
    "BLBLI_R",
    "FQR",
    "GC3_R",
    "Timestamp",
    "Entry_By",
];

/// Number of header rows above the first record
pub const HEADER_ROWS: usize = 1;

/// Ordered, non-empty list of unique field names.
///
/// Field `i` is stored in column `i + 1`, and the schema order is the
/// order of the header row and of every exported CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, field) in fields.iter().enumerate() {
            if field.trim().is_empty() {
                return Err(SchemaError::BlankField(index));
            }
            if !seen.insert(field.as_str()) {
                return Err(SchemaError::Duplicate(field.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// The AMR patient record schema
    #[must_use]
    pub fn amr() -> Self {
        Self {
            fields: AMR_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    #[must_use]
    pub fn header_row(&self) -> Vec<String> {
        self.fields.clone()
    }

    /// Row values in schema order; absent fields become empty cells
    #[must_use]
    pub fn to_row(&self, record: &Record) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| record.get(field).to_string())
            .collect()
    }

    /// Restrict a header-keyed mapping to exactly the schema's fields
    #[must_use]
    pub fn project(&self, values: &BTreeMap<String, String>) -> Record {
        self.fields
            .iter()
            .map(|field| {
                let value = values.get(field).cloned().unwrap_or_default();
                (field.clone(), value)
            })
            .collect()
    }

    /// Table row number of a record position
    #[must_use]
    pub fn row_number(position: usize) -> usize {
        position + HEADER_ROWS + 1
    }

    /// The single-row range covering every schema column of a record
    #[must_use]
    pub fn update_range(&self, position: usize) -> String {
        a1::row_range(self.width(), Self::row_number(position))
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::amr()
    }
}
