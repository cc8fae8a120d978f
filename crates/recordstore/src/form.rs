// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Schema-driven data entry form.
//!
//! Each schema field gets a [`FieldSpec`] describing its input kind. A form
//! is pre-filled from an existing record (or defaults) and then filled from
//! user input; the timestamp field is stamped on every fill.

use crate::error::FormError;
use crate::record::Record;
use crate::schema::Schema;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FLAG_OPTIONS: [&str; 2] = ["0", "1"];

/// Index of `value` in `options`, or `fallback` when it is absent
pub fn find_or_default<T, V>(options: &[T], value: &V, fallback: usize) -> usize
where
    T: PartialEq<V>,
    V: ?Sized,
{
    options
        .iter()
        .position(|option| option == value)
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Number { min: i64, max: i64, default: i64 },
    Choice { options: Vec<String>, default: usize },
    /// 0/1 indicator
    Flag,
    /// Set to the current time on save
    Timestamp,
    Text { default: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

fn choice(options: &[&str]) -> FieldKind {
    FieldKind::Choice {
        options: options.iter().map(|o| o.to_string()).collect(),
        default: 0,
    }
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Input definition for an AMR field; unknown fields are free text
    #[must_use]
    pub fn amr(name: &str, entry_by: &str) -> Self {
        match name {
            "Age" => Self::new(
                name,
                "Age",
                FieldKind::Number {
                    min: 0,
                    max: 120,
                    default: 65,
                },
            ),
            "Gender" => Self::new(name, "Gender", choice(&["Male", "Female", "Other"])),
            "Species" => Self::new(
                name,
                "Species",
                choice(&[
                    "E. coli",
                    "Klebsiella spp.",
                    "Proteus spp.",
                    "Pseudomonas spp.",
                    "Acinetobacter spp.",
                    "Other",
                ]),
            ),
            "Rectal_CPE_Pos" => Self::new(name, "Rectal CPE positive", FieldKind::Flag),
            "Setting" => Self::new(
                name,
                "Setting",
                choice(&["ICU", "Internal Medicine", "Emergency", "Surgical Ward"]),
            ),
            "Acquisition" => Self::new(name, "Acquisition", choice(&["Community", "Hospital"])),
            "BSI_Source" => Self::new(
                name,
                "BSI source",
                choice(&["Primary", "Lung", "Secondary", "Unknown"]),
            ),
            "CHF" => Self::new(name, "Congestive heart failure", FieldKind::Flag),
            "CKD" => Self::new(name, "Chronic kidney disease", FieldKind::Flag),
            "Tumor" => Self::new(name, "Tumor", FieldKind::Flag),
            "Diabetes" => Self::new(name, "Diabetes", FieldKind::Flag),
            "Immunosuppressed" => Self::new(name, "Immunosuppressed", FieldKind::Flag),
            "CR" => Self::new(name, "Carbapenem resistant", FieldKind::Flag),
            "BLBLI_R" => Self::new(name, "BL/BLI resistant", FieldKind::Flag),
            "FQR" => Self::new(name, "Fluoroquinolone resistant", FieldKind::Flag),
            "GC3_R" => Self::new(name, "3rd gen. cephalosporin resistant", FieldKind::Flag),
            "Timestamp" => Self::new(name, "Timestamp", FieldKind::Timestamp),
            "Entry_By" => Self::new(
                name,
                "Entered by",
                FieldKind::Text {
                    default: entry_by.to_string(),
                },
            ),
            _ => Self::new(
                name,
                name,
                FieldKind::Text {
                    default: String::new(),
                },
            ),
        }
    }

    /// Value shown before the user changes anything.
    ///
    /// Existing values that cannot be shown as-is (out of range, not an
    /// option) fall back to the field default.
    #[must_use]
    pub fn initial_value(&self, existing: Option<&Record>) -> String {
        let current = existing.map(|r| r.get(&self.name).trim()).unwrap_or("");
        match &self.kind {
            FieldKind::Number { min, max, default } => current
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| (v.trunc() as i64).clamp(*min, *max))
                .unwrap_or(*default)
                .to_string(),
            FieldKind::Choice { options, default } => {
                let index = find_or_default(options, current, *default);
                options.get(index).cloned().unwrap_or_default()
            }
            FieldKind::Flag => {
                let normalized = parse_flag(current).unwrap_or("0");
                FLAG_OPTIONS[find_or_default(&FLAG_OPTIONS, &normalized, 0)].to_string()
            }
            FieldKind::Timestamp => current.to_string(),
            FieldKind::Text { default } => match existing {
                Some(record) if record.contains(&self.name) => record.get(&self.name).to_string(),
                _ => default.clone(),
            },
        }
    }

    /// Validate and normalize one user input
    pub fn accept(&self, input: &str) -> Result<String, FormError> {
        let value = input.trim();
        match &self.kind {
            FieldKind::Number { min, max, .. } => {
                let number: i64 = value.parse().map_err(|_| FormError::InvalidNumber {
                    field: self.name.clone(),
                    value: input.to_string(),
                })?;
                if number < *min || number > *max {
                    return Err(FormError::OutOfRange {
                        field: self.name.clone(),
                        value: number,
                        min: *min,
                        max: *max,
                    });
                }
                Ok(number.to_string())
            }
            FieldKind::Choice { options, .. } => options
                .iter()
                .find(|o| o.as_str() == value)
                .or_else(|| options.iter().find(|o| o.eq_ignore_ascii_case(value)))
                .cloned()
                .ok_or_else(|| FormError::InvalidChoice {
                    field: self.name.clone(),
                    value: input.to_string(),
                    options: options.clone(),
                }),
            FieldKind::Flag => parse_flag(value)
                .map(str::to_string)
                .ok_or_else(|| FormError::InvalidFlag {
                    field: self.name.clone(),
                    value: input.to_string(),
                }),
            FieldKind::Timestamp => Err(FormError::ReadOnly(self.name.clone())),
            FieldKind::Text { .. } => Ok(input.to_string()),
        }
    }
}

fn parse_flag(value: &str) -> Option<&'static str> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" => Some("1"),
        "0" | "n" | "no" | "false" => Some("0"),
        _ => None,
    }
}

/// One input per schema field, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<FieldSpec>,
}

impl Form {
    #[must_use]
    pub fn for_schema(schema: &Schema, entry_by: &str) -> Self {
        Self {
            fields: schema
                .fields()
                .iter()
                .map(|name| FieldSpec::amr(name, entry_by))
                .collect(),
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Initial values for every field
    #[must_use]
    pub fn prefill(&self, existing: Option<&Record>) -> Record {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial_value(existing)))
            .collect()
    }

    /// Build the record to save from pre-filled values plus `inputs`.
    ///
    /// Every input must name a form field. Timestamp fields are set to `now`.
    pub fn fill(
        &self,
        existing: Option<&Record>,
        inputs: &BTreeMap<String, String>,
        now: NaiveDateTime,
    ) -> Result<Record, FormError> {
        if let Some(unknown) = inputs.keys().find(|name| self.field(name).is_none()) {
            return Err(FormError::UnknownField(unknown.clone()));
        }

        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        let mut record = Record::new();
        for spec in &self.fields {
            let value = match (&spec.kind, inputs.get(&spec.name)) {
                (FieldKind::Timestamp, None) => stamp.clone(),
                (_, Some(input)) => spec.accept(input)?,
                (_, None) => spec.initial_value(existing),
            };
            record.set(spec.name.clone(), value);
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(9, 26, 53))
            .unwrap()
    }

    fn inputs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_find_or_default() {
        let options = ["Male", "Female", "Other"].map(String::from);
        assert_eq!(find_or_default(&options, "Female", 0), 1);
        assert_eq!(find_or_default(&options, "unknown", 0), 0);
        assert_eq!(find_or_default(&options, "", 2), 2);
        assert_eq!(find_or_default(&[0, 1], &1, 0), 1);
        assert_eq!(find_or_default::<i32, i32>(&[], &5, 0), 0);
    }

    #[test]
    fn test_defaults_for_new_record() {
        let form = Form::for_schema(&Schema::amr(), "nurse");
        let values = form.prefill(None);
        assert_eq!(values.get("Age"), "65");
        assert_eq!(values.get("Gender"), "Male");
        assert_eq!(values.get("Species"), "E. coli");
        assert_eq!(values.get("CR"), "0");
        assert_eq!(values.get("Entry_By"), "nurse");
        assert_eq!(values.get("Timestamp"), "");
    }

    #[test]
    fn test_prefill_from_existing() {
        let form = Form::for_schema(&Schema::amr(), "nurse");
        let existing = Record::from_pairs([
            ("Age", "130"),
            ("Gender", "Female"),
            ("Species", "Martian"),
            ("CKD", "1"),
            ("Entry_By", ""),
        ]);
        let values = form.prefill(Some(&existing));
        assert_eq!(values.get("Age"), "120");
        assert_eq!(values.get("Gender"), "Female");
        assert_eq!(values.get("Species"), "E. coli");
        assert_eq!(values.get("CKD"), "1");
        assert_eq!(values.get("Entry_By"), "");
    }

    #[test]
    fn test_fill_validates_and_stamps() {
        let form = Form::for_schema(&Schema::amr(), "nurse");
        let record = form
            .fill(
                None,
                &inputs(&[("Age", " 42 "), ("Setting", "icu"), ("FQR", "yes")]),
                now(),
            )
            .unwrap();
        assert_eq!(record.len(), 18);
        assert_eq!(record.get("Age"), "42");
        assert_eq!(record.get("Setting"), "ICU");
        assert_eq!(record.get("FQR"), "1");
        assert_eq!(record.get("Timestamp"), "2025-03-14 09:26:53");
        assert_eq!(record.get("Entry_By"), "nurse");
    }

    #[test]
    fn test_fill_rejects_bad_input() {
        let form = Form::for_schema(&Schema::amr(), "");
        assert!(matches!(
            form.fill(None, &inputs(&[("Weight", "80")]), now()),
            Err(FormError::UnknownField(_))
        ));
        assert!(matches!(
            form.fill(None, &inputs(&[("Age", "old")]), now()),
            Err(FormError::InvalidNumber { .. })
        ));
        assert!(matches!(
            form.fill(None, &inputs(&[("Age", "121")]), now()),
            Err(FormError::OutOfRange { value: 121, .. })
        ));
        assert!(matches!(
            form.fill(None, &inputs(&[("Gender", "Unknown")]), now()),
            Err(FormError::InvalidChoice { .. })
        ));
        assert!(matches!(
            form.fill(None, &inputs(&[("CR", "maybe")]), now()),
            Err(FormError::InvalidFlag { .. })
        ));
        assert_eq!(
            form.fill(None, &inputs(&[("Timestamp", "yesterday")]), now()),
            Err(FormError::ReadOnly("Timestamp".to_string()))
        );
    }

    #[test]
    fn test_custom_schema_fields_are_text() {
        let schema = Schema::new(["Age", "Ward"]).unwrap();
        let form = Form::for_schema(&schema, "");
        assert_eq!(
            form.field("Ward").map(|f| &f.kind),
            Some(&FieldKind::Text {
                default: String::new()
            })
        );
        let existing = Record::from_pairs([("Age", "30"), ("Ward", "3B")]);
        let record = form
            .fill(Some(&existing), &inputs(&[("Age", "31")]), now())
            .unwrap();
        assert_eq!(record.get("Age"), "31");
        assert_eq!(record.get("Ward"), "3B");
    }
}
