// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Result, anyhow};
use recordstore::{RecordSet, Schema};

const MAX_CELL: usize = 24;

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CELL - 3).collect();
        format!("{head}...")
    }
}

/// Render records as an aligned table numbered from 1.
///
/// `columns` selects and orders the fields shown; empty means all.
pub fn render_records(
    schema: &Schema,
    records: &RecordSet,
    columns: &[String],
) -> Result<Vec<String>> {
    let columns: Vec<String> = if columns.is_empty() {
        schema.fields().to_vec()
    } else {
        if let Some(unknown) = columns.iter().find(|c| !schema.contains(c)) {
            return Err(anyhow!("Unknown field '{unknown}'"));
        }
        columns.to_vec()
    };

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);
    let mut header = vec!["#".to_string()];
    header.extend(columns.iter().cloned());
    rows.push(header);
    for (position, record) in records.iter().enumerate() {
        let mut row = vec![(position + 1).to_string()];
        row.extend(columns.iter().map(|c| truncate(record.get(c))));
        rows.push(row);
    }

    let mut widths = vec![0; columns.len() + 1];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    Ok(rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect())
}

pub fn list_command(schema: &Schema, records: &RecordSet, columns: &[String]) -> Result<()> {
    if records.is_empty() {
        println!("No records");
        return Ok(());
    }
    for line in render_records(schema, records, columns)? {
        println!("{line}");
    }
    println!("\n{} records", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordstore::Record;

    #[test]
    fn test_render_selected_columns() {
        let schema = Schema::amr();
        let records: RecordSet = vec![
            Record::from_pairs([("Age", "65"), ("Species", "E. coli")]),
            Record::from_pairs([("Age", "7"), ("Species", "Klebsiella spp.")]),
        ]
        .into();
        let columns = vec!["Species".to_string(), "Age".to_string()];

        let lines = render_records(&schema, &records, &columns).unwrap();
        assert_eq!(
            lines,
            vec![
                "#  Species          Age",
                "1  E. coli          65",
                "2  Klebsiella spp.  7",
            ]
        );
    }

    #[test]
    fn test_render_unknown_column() {
        let records = RecordSet::new();
        assert!(render_records(&Schema::amr(), &records, &["Weight".to_string()]).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(30);
        assert_eq!(truncate(&long).chars().count(), MAX_CELL);
        assert!(truncate(&long).ends_with("..."));
    }
}
