// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Adapter behaviour against an in-memory table.

use recordstore::{AMR_FIELDS, Record, Schema, StoreError, adapter};
use sheets::{Call, FailureMode, MemoryTable, Table};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn small_schema() -> Schema {
    Schema::new(["Age", "Gender", "Species"]).unwrap()
}

fn seeded() -> MemoryTable {
    MemoryTable::with_rows(
        "Sheet1",
        vec![
            strings(&["Age", "Gender", "Species"]),
            strings(&["65", "Male", "E. coli"]),
            strings(&["70", "Female", "Klebsiella spp."]),
            strings(&["40", "Other", "Proteus spp."]),
        ],
    )
}

fn ages(table: &MemoryTable, schema: &Schema) -> Vec<String> {
    adapter::load_all(table, schema)
        .unwrap()
        .iter()
        .map(|r| r.get("Age").to_string())
        .collect()
}

#[test]
fn test_projection_drops_extra_and_fills_missing() {
    let table = MemoryTable::with_rows(
        "Sheet1",
        vec![
            strings(&["Species", "Ward", "Age"]),
            strings(&["E. coli", "3B", "65"]),
            strings(&["Other"]),
        ],
    );
    let schema = small_schema();

    let records = adapter::load_all(&table, &schema).unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Age", "Gender", "Species"]);
    }
    assert_eq!(records.get(0).unwrap().get("Age"), "65");
    assert_eq!(records.get(0).unwrap().get("Gender"), "");
    assert_eq!(records.get(1).unwrap().get("Species"), "Other");
    assert_eq!(records.get(1).unwrap().get("Age"), "");
    assert_eq!(table.write_count(), 0);
}

#[test]
fn test_blank_middle_row_keeps_positions() {
    let table = MemoryTable::with_rows(
        "Sheet1",
        vec![
            strings(&["Age", "Gender", "Species"]),
            strings(&["65", "Male", "E. coli"]),
            strings(&[]),
            strings(&["40", "Other", "Proteus spp."]),
        ],
    );
    assert_eq!(ages(&table, &small_schema()), vec!["65", "", "40"]);
}

#[test]
fn test_append_order() {
    let table = seeded();
    let schema = small_schema();

    let r1 = Record::from_pairs([("Age", "30"), ("Species", "Other")]);
    let r2 = Record::from_pairs([("Age", "31"), ("Gender", "Male"), ("Unknown", "x")]);
    adapter::append(&table, &schema, &r1).unwrap();
    adapter::append(&table, &schema, &r2).unwrap();

    let records = adapter::load_all(&table, &schema).unwrap();
    let n = records.len();
    assert_eq!(n, 5);
    assert_eq!(records.get(n - 2), Some(&schema.project(&r1_map(&r1))));
    let last = records.get(n - 1).unwrap();
    assert_eq!(last.get("Age"), "31");
    assert_eq!(last.get("Gender"), "Male");
    assert_eq!(last.get("Species"), "");
    assert!(!last.contains("Unknown"));
}

fn r1_map(record: &Record) -> std::collections::BTreeMap<String, String> {
    record
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_update_replaces_whole_row() {
    let table = seeded();
    let schema = small_schema();
    table.clear_calls();

    let replacement = Record::from_pairs([("Age", "71")]);
    adapter::update(&table, &schema, 1, &replacement).unwrap();

    assert_eq!(
        table.calls(),
        vec![Call::Update {
            range: "A3:C3".to_string(),
            row: strings(&["71", "", ""]),
        }]
    );

    let records = adapter::load_all(&table, &schema).unwrap();
    let updated = records.get(1).unwrap();
    assert_eq!(updated.get("Age"), "71");
    assert_eq!(updated.get("Gender"), "");
    assert_eq!(updated.get("Species"), "");
    assert_eq!(records.get(0).unwrap().get("Age"), "65");
    assert_eq!(records.get(2).unwrap().get("Age"), "40");
}

#[test]
fn test_update_is_one_call_for_any_width() {
    let schema = Schema::amr();
    let table = MemoryTable::with_rows("Sheet1", vec![schema.header_row(), strings(&["65"])]);
    table.clear_calls();

    let record = Record::from_pairs(AMR_FIELDS.iter().map(|f| (*f, "1")));
    adapter::update(&table, &schema, 0, &record).unwrap();
    assert_eq!(table.write_count(), 1);
    assert_eq!(table.rows()[1], vec!["1".to_string(); 18]);
}

#[test]
fn test_delete_shifts_positions() {
    let table = seeded();
    let schema = small_schema();

    adapter::delete(&table, 1).unwrap();
    assert_eq!(table.calls().last(), Some(&Call::Delete(3)));
    assert_eq!(ages(&table, &schema), vec!["65", "40"]);
}

#[test]
fn test_empty_table_bootstrap() {
    let schema = small_schema();

    let table = MemoryTable::new("Sheet1");
    let records = adapter::load_all(&table, &schema).unwrap();
    assert!(records.is_empty());
    assert_eq!(table.calls(), vec![Call::Read, Call::Append(schema.header_row())]);

    // A second load sees the header and writes nothing
    let _ = adapter::load_all(&table, &schema).unwrap();
    assert_eq!(table.write_count(), 1);

    let table = MemoryTable::new("Sheet1");
    adapter::append(&table, &schema, &Record::from_pairs([("Age", "9")])).unwrap();
    assert_eq!(
        table.rows(),
        vec![schema.header_row(), strings(&["9", "", ""])]
    );
}

#[test]
fn test_existing_header_is_never_rewritten() {
    let table = MemoryTable::with_rows("Sheet1", vec![strings(&["Age", "Old"])]);
    let values = adapter::ensure_headers(&table, &small_schema()).unwrap();
    assert_eq!(values, vec![strings(&["Age", "Old"])]);
    assert_eq!(table.write_count(), 0);
}

#[test]
fn test_wide_schema_range() {
    let schema = Schema::new((1..=30).map(|i| format!("F{i}"))).unwrap();
    let table = MemoryTable::with_rows("Sheet1", vec![schema.header_row(), strings(&["x"])]);
    table.clear_calls();

    let record = Record::from_pairs([("F30", "last"), ("F27", "aa")]);
    adapter::update(&table, &schema, 0, &record).unwrap();

    match table.calls().as_slice() {
        [Call::Update { range, row }] => {
            assert_eq!(range, "A2:AD2");
            assert_eq!(row.len(), 30);
        }
        other => panic!("unexpected calls: {other:?}"),
    }
    let loaded = adapter::load_all(&table, &schema).unwrap();
    assert_eq!(loaded.get(0).unwrap().get("F27"), "aa");
    assert_eq!(loaded.get(0).unwrap().get("F30"), "last");
    assert_eq!(loaded.get(0).unwrap().get("F1"), "");
}

#[test]
fn test_offline_failures() {
    let table = seeded();
    let schema = small_schema();
    let before = table.rows();
    table.set_failure(Some(FailureMode::Offline));

    let record = Record::from_pairs([("Age", "1")]);
    let errors = vec![
        adapter::load_all(&table, &schema).unwrap_err(),
        adapter::append(&table, &schema, &record).unwrap_err(),
        adapter::update(&table, &schema, 0, &record).unwrap_err(),
        adapter::delete(&table, 0).unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, StoreError::StoreUnavailable(_)), "{err}");
        assert!(!err.cause().is_empty());
    }
    assert_eq!(table.rows(), before);
}

#[test]
fn test_rejected_writes() {
    let table = seeded();
    let schema = small_schema();
    let before = table.rows();
    table.set_failure(Some(FailureMode::Rejecting));

    let record = Record::from_pairs([("Age", "1")]);
    assert!(matches!(
        adapter::append(&table, &schema, &record),
        Err(StoreError::WriteFailed(_))
    ));
    assert!(matches!(
        adapter::update(&table, &schema, 0, &record),
        Err(StoreError::WriteFailed(_))
    ));
    assert!(matches!(
        adapter::delete(&table, 0),
        Err(StoreError::DeleteFailed(_))
    ));
    assert_eq!(table.rows(), before);

    // Reads still work
    assert_eq!(adapter::load_all(&table, &schema).unwrap().len(), 3);
}

#[test]
fn test_header_write_refused_on_empty_table() {
    let table = MemoryTable::new("Sheet1");
    table.set_failure(Some(FailureMode::Rejecting));
    let err = adapter::load_all(&table, &small_schema()).unwrap_err();
    assert!(matches!(err, StoreError::WriteFailed(_)));
    assert!(table.get_all_values().unwrap().is_empty());
}

#[test]
fn test_blank_record_is_never_written() {
    let table = seeded();
    let schema = small_schema();
    let before = table.rows();
    table.clear_calls();

    // A blank last row would drop out of the next load
    assert!(matches!(
        adapter::update(&table, &schema, 2, &Record::new()),
        Err(StoreError::WriteFailed(_))
    ));
    assert!(table.calls().is_empty());

    let blank = Record::from_pairs([("Age", ""), ("Ward", "3B")]);
    assert!(matches!(
        adapter::append(&table, &schema, &blank),
        Err(StoreError::WriteFailed(_))
    ));
    assert_eq!(table.write_count(), 0);
    assert_eq!(table.rows(), before);
    assert_eq!(ages(&table, &schema), vec!["65", "70", "40"]);
}
