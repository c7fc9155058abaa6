//! # Record Round-Trip Tests
//!
//! Writes records through `RecordBuffer` into real files and reads them back,
//! the way a table writer and reader drive the codec.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use dbf_codec::{
    CodePage, FieldValue, RecordBuffer, RecordError, Schema, SchemaBuilder, TruncationKind,
    TruncationPolicy,
};
use tempfile::tempdir;

fn inventory_schema() -> Arc<Schema> {
    SchemaBuilder::new()
        .code_page(CodePage::Windows1252)
        .column_tagged("SKU", b'C', 8, 0)
        .unwrap()
        .column_tagged("QTY", b'N', 6, 0)
        .unwrap()
        .column_tagged("PRICE", b'N', 10, 2)
        .unwrap()
        .column_tagged("WEIGHT", b'F', 12, 3)
        .unwrap()
        .column_tagged("BIN", b'I', 4, 0)
        .unwrap()
        .column_tagged("INSTOCK", b'L', 1, 0)
        .unwrap()
        .column_tagged("RESTOCK", b'D', 8, 0)
        .unwrap()
        .build()
        .unwrap()
}

struct Item {
    sku: &'static str,
    qty: &'static str,
    price: &'static str,
    weight: &'static str,
    bin: i32,
    in_stock: &'static str,
    restock: &'static str,
}

const ITEMS: [Item; 3] = [
    Item {
        sku: "A-100",
        qty: "12",
        price: "3.1",
        weight: "0.250",
        bin: 7,
        in_stock: "yes",
        restock: "2024-01-15",
    },
    Item {
        sku: "B-200€",
        qty: "0",
        price: "1999.99",
        weight: "12.5",
        bin: -1,
        in_stock: "no",
        restock: "",
    },
    Item {
        sku: "C-300",
        qty: "-5",
        price: ".5",
        weight: "1e2",
        bin: i32::MIN,
        in_stock: "?",
        restock: "12/31/1999",
    },
];

fn write_items(record: &mut RecordBuffer, out: &mut impl Write) -> eyre::Result<()> {
    for item in &ITEMS {
        record.set_by_name("sku", item.sku)?;
        record.set_by_name("qty", item.qty)?;
        record.set_by_name("price", item.price)?;
        record.set_by_name("weight", item.weight)?;
        record.set_by_name("bin", &item.bin.to_string())?;
        record.set_by_name("instock", item.in_stock)?;
        record.set_by_name("restock", item.restock)?;
        record.write_and_clear(out)?;
    }
    Ok(())
}

#[test]
fn records_survive_a_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.dat");
    let schema = inventory_schema();

    let mut record = RecordBuffer::new(schema.clone());
    let mut out = BufWriter::new(File::create(&path).unwrap());
    write_items(&mut record, &mut out).unwrap();
    out.flush().unwrap();
    drop(out);

    let len = std::fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(len, ITEMS.len() * schema.record_len());

    let mut input = BufReader::new(File::open(&path).unwrap());
    let mut rows = Vec::new();
    let mut index = 0;
    while record.read_from(&mut input).unwrap() {
        record.set_record_index(index);
        index += 1;
        rows.push((
            record.get_trimmed(0).unwrap(),
            record.get(2).unwrap(),
            record.get_i32(4).unwrap(),
            record.get_bool(5).unwrap(),
            record.get_date(6).unwrap(),
        ));
    }
    assert_eq!(record.record_index(), Some(2));

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        (
            "A-100".to_string(),
            "      3.10".to_string(),
            7,
            Some(true),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        )
    );
    assert_eq!(
        rows[1],
        (
            "B-200€".to_string(),
            "   1999.99".to_string(),
            -1,
            Some(false),
            None
        )
    );
    assert_eq!(
        rows[2],
        (
            "C-300".to_string(),
            "      0.50".to_string(),
            i32::MIN,
            None,
            NaiveDate::from_ymd_opt(1999, 12, 31)
        )
    );
}

#[test]
fn deletion_marker_is_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deleted.dat");
    let schema = inventory_schema();

    let mut record = RecordBuffer::new(schema.clone());
    let mut file = File::options()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();

    record.set(0, "KEEP").unwrap();
    record.write_and_clear(&mut file).unwrap();
    record.set(0, "DROP").unwrap();
    record.set_deleted(true);
    record.write_and_clear(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let mut live = Vec::new();
    while record.read_from(&mut file).unwrap() {
        if !record.is_deleted() {
            live.push(record.get_value(0).unwrap());
        }
    }
    assert_eq!(live, vec![FieldValue::Text("KEEP".into())]);
}

#[test]
fn truncated_file_yields_incomplete_last_record() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.dat");
    let schema = inventory_schema();

    let mut record = RecordBuffer::new(schema.clone());
    let mut out = File::create(&path).unwrap();
    write_items(&mut record, &mut out).unwrap();
    let full = (ITEMS.len() * schema.record_len()) as u64;
    out.set_len(full - 3).unwrap();
    drop(out);

    let mut input = File::open(&path).unwrap();
    let mut complete = 0;
    while record.read_from(&mut input).unwrap() {
        complete += 1;
    }
    assert_eq!(complete, 2);
}

#[test]
fn strict_policy_rejects_every_lossy_axis() {
    let mut record = RecordBuffer::with_policy(inventory_schema(), TruncationPolicy::strict());

    let cases = [
        ("SKU", "TOO-LONG-SKU", TruncationKind::String),
        ("QTY", "1234567", TruncationKind::IntegerDigits),
        ("PRICE", "1.999", TruncationKind::DecimalDigits),
    ];
    for (column, value, expected) in cases {
        let err = record.set_by_name(column, value).unwrap_err();
        match err.downcast_ref::<RecordError>() {
            Some(RecordError::Truncation { kind, .. }) => assert_eq!(*kind, expected),
            other => panic!("unexpected error for {column}: {other:?}"),
        }
    }
    assert_eq!(record.as_bytes(), record.schema().blank_record());
}

#[test]
fn buffers_share_one_schema() {
    let schema = inventory_schema();
    let mut first = RecordBuffer::new(schema.clone());
    let mut second = RecordBuffer::new(schema.clone());

    first.set(0, "FIRST").unwrap();
    second.set(0, "SECOND").unwrap();

    assert_eq!(first.get_trimmed(0).unwrap(), "FIRST");
    assert_eq!(second.get_trimmed(0).unwrap(), "SECOND");
    assert!(Arc::ptr_eq(first.schema(), second.schema()));
    assert_eq!(Arc::strong_count(&schema), 3);
}
