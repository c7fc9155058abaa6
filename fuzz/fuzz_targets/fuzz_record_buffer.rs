//! Fuzz testing for the record buffer codec.
//!
//! Drives arbitrary set operations against arbitrary schemas and checks the
//! invariants every operation must keep: the record length never changes, a
//! failed set leaves the bytes untouched, and bytes outside the targeted
//! field are never modified.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use dbf_codec::{FieldType, RecordBuffer, SchemaBuilder, TruncationPolicy};

#[derive(Debug, Arbitrary)]
struct RecordBufferInput {
    schema: Vec<FuzzColumn>,
    policy: (bool, bool, bool),
    operations: Vec<SetOperation>,
}

#[derive(Debug, Arbitrary)]
struct FuzzColumn {
    field_type: FuzzFieldType,
    length: u8,
    decimals: u8,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzFieldType {
    Character,
    Number,
    Float,
    Integer,
    Memo,
    Boolean,
    Date,
    Binary,
}

#[derive(Debug, Arbitrary)]
enum SetOperation {
    SetText(u8, String),
    SetBinary(u8, Vec<u8>),
    SetNull(u8),
    SetDeleted(bool),
    Clear,
}

impl From<FuzzFieldType> for FieldType {
    fn from(ft: FuzzFieldType) -> Self {
        match ft {
            FuzzFieldType::Character => FieldType::Character,
            FuzzFieldType::Number => FieldType::Number,
            FuzzFieldType::Float => FieldType::Float,
            FuzzFieldType::Integer => FieldType::Integer,
            FuzzFieldType::Memo => FieldType::Memo,
            FuzzFieldType::Boolean => FieldType::Boolean,
            FuzzFieldType::Date => FieldType::Date,
            FuzzFieldType::Binary => FieldType::Binary,
        }
    }
}

fuzz_target!(|input: RecordBufferInput| {
    if input.schema.is_empty() || input.schema.len() > 32 {
        return;
    }

    let mut builder = SchemaBuilder::new();
    for (i, col) in input.schema.iter().enumerate() {
        let field_type: FieldType = col.field_type.into();
        let length = if field_type.fixed_len().is_some() {
            0
        } else {
            col.length as usize
        };
        let decimals = if field_type.supports_decimals() {
            col.decimals as usize
        } else {
            0
        };
        builder = builder.column(format!("C{}", i), field_type, length, decimals);
    }
    let Ok(schema) = builder.build() else {
        return;
    };

    let (allow_string, allow_integer, allow_decimal) = input.policy;
    let policy = TruncationPolicy {
        allow_string,
        allow_integer,
        allow_decimal,
    };
    let mut record = RecordBuffer::with_policy(schema.clone(), policy);
    let col_count = schema.column_count();

    for op in &input.operations {
        let before = record.as_bytes().to_vec();
        match op {
            SetOperation::SetText(idx, value) => {
                let idx = (*idx as usize) % col_count;
                let range = schema.column(idx).unwrap().byte_range();
                if record.set(idx, value).is_err() {
                    assert_eq!(record.as_bytes(), before.as_slice());
                }
                assert_eq!(&record.as_bytes()[..range.start], &before[..range.start]);
                assert_eq!(&record.as_bytes()[range.end..], &before[range.end..]);
            }
            SetOperation::SetBinary(idx, value) => {
                let idx = (*idx as usize) % col_count;
                if record.set_binary(idx, value).is_err() {
                    assert_eq!(record.as_bytes(), before.as_slice());
                }
            }
            SetOperation::SetNull(idx) => {
                let idx = (*idx as usize) % col_count;
                record.set_null(idx).unwrap();
                let range = schema.column(idx).unwrap().byte_range();
                assert_eq!(record.get_raw(idx).unwrap(), &schema.blank_record()[range]);
            }
            SetOperation::SetDeleted(deleted) => {
                record.set_deleted(*deleted);
                assert_eq!(&record.as_bytes()[1..], &before[1..]);
            }
            SetOperation::Clear => {
                record.clear();
                assert_eq!(record.as_bytes(), schema.blank_record());
            }
        }
        assert_eq!(record.as_bytes().len(), schema.record_len());

        for idx in 0..col_count {
            let _ = record.get_value(idx);
        }
    }
});
