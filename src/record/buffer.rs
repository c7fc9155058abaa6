//! # RecordBuffer - One Fixed-Width Row
//!
//! `RecordBuffer` owns exactly `record_len` bytes laid out by its schema and
//! exposes typed setters and getters over them. A buffer is meant to be
//! reused: set values, write, `clear`, repeat, without allocating per row.
//!
//! ## Usage
//!
//! ```ignore
//! let mut record = RecordBuffer::new(schema.clone());
//! record.set_by_name("NAME", "Widget")?;
//! record.set_by_name("PRICE", "3.1")?;
//! record.write_and_clear(&mut file)?;
//!
//! while record.read_from(&mut file)? {
//!     let name = record.get_trimmed(0)?;
//! }
//! ```
//!
//! ## Failure Semantics
//!
//! A set that fails leaves the field exactly as it was. Reads that hit end of
//! input before a whole record was filled return `Ok(false)`; the buffer then
//! holds a partial record and must be cleared or refilled before use.
//!
//! ## Thread Safety
//!
//! Every accessor reads or writes `data` directly, so a buffer is used by one
//! caller at a time. Buffers of the same schema share only the immutable
//! `Schema` (and with it the blank template).

use std::io::{self, Read, Write};
use std::sync::Arc;

use chrono::NaiveDate;
use eyre::Result;

use crate::config::{
    TruncationPolicy, ACTIVE_MARKER, BOOL_FALSE, BOOL_TRUE, BOOL_UNKNOWN, DELETED_MARKER,
};
use crate::error::RecordError;
use crate::record::codec;
use crate::record::value::FieldValue;
use crate::schema::{ColumnDef, Schema};
use crate::types::FieldType;

fn column_at(schema: &Schema, col_idx: usize) -> Result<&ColumnDef> {
    schema.column(col_idx).ok_or_else(|| {
        eyre::Report::new(RecordError::ColumnIndexOutOfRange {
            index: col_idx,
            count: schema.column_count(),
        })
    })
}

fn require_type(col: &ColumnDef, field_type: FieldType, expected: &'static str) -> Result<()> {
    if col.field_type() != field_type {
        eyre::bail!(RecordError::TypeMismatch {
            column: col.name().to_string(),
            expected,
            actual: col.field_type(),
        });
    }
    Ok(())
}

fn unsupported(col: &ColumnDef) -> eyre::Report {
    eyre::Report::new(RecordError::Unsupported {
        column: col.name().to_string(),
        field_type: col.field_type(),
    })
}

fn binary_only(col: &ColumnDef) -> eyre::Report {
    eyre::Report::new(RecordError::TypeMismatch {
        column: col.name().to_string(),
        expected: "a text-encoded type (use the binary accessors)",
        actual: col.field_type(),
    })
}

#[derive(Debug, Clone)]
pub struct RecordBuffer {
    schema: Arc<Schema>,
    data: Box<[u8]>,
    record_index: Option<u64>,
    policy: TruncationPolicy,
}

impl RecordBuffer {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_policy(schema, TruncationPolicy::default())
    }

    pub fn with_policy(schema: Arc<Schema>, policy: TruncationPolicy) -> Self {
        let data = schema.blank_record().into();
        Self {
            schema,
            data,
            record_index: None,
            policy,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn column_count(&self) -> usize {
        self.schema.column_count()
    }

    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.schema.column_index(name)
    }

    pub fn record_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Position of this record in its file; `None` until assigned.
    pub fn record_index(&self) -> Option<u64> {
        self.record_index
    }

    pub fn set_record_index(&mut self, index: u64) {
        self.record_index = Some(index);
    }

    pub fn policy(&self) -> TruncationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TruncationPolicy) {
        self.policy = policy;
    }

    pub fn allow_string_truncate(&self) -> bool {
        self.policy.allow_string
    }

    pub fn set_allow_string_truncate(&mut self, allow: bool) {
        self.policy.allow_string = allow;
    }

    pub fn allow_integer_truncate(&self) -> bool {
        self.policy.allow_integer
    }

    pub fn set_allow_integer_truncate(&mut self, allow: bool) {
        self.policy.allow_integer = allow;
    }

    pub fn allow_decimal_truncate(&self) -> bool {
        self.policy.allow_decimal
    }

    pub fn set_allow_decimal_truncate(&mut self, allow: bool) {
        self.policy.allow_decimal = allow;
    }

    pub fn is_deleted(&self) -> bool {
        self.data[0] == DELETED_MARKER
    }

    pub fn set_deleted(&mut self, deleted: bool) {
        self.data[0] = if deleted { DELETED_MARKER } else { ACTIVE_MARKER };
    }

    /// Restores every byte to the blank template and forgets the record index.
    pub fn clear(&mut self) {
        self.data.copy_from_slice(self.schema.blank_record());
        self.record_index = None;
    }

    fn field_mut(&mut self, col_idx: usize) -> Result<(&ColumnDef, &mut [u8], &[u8])> {
        let col = column_at(&self.schema, col_idx)?;
        let range = col.byte_range();
        let blank = &self.schema.blank_record()[range.clone()];
        Ok((col, &mut self.data[range], blank))
    }

    fn field(&self, col_idx: usize) -> Result<(&ColumnDef, &[u8])> {
        let col = column_at(&self.schema, col_idx)?;
        Ok((col, &self.data[col.byte_range()]))
    }

    fn resolve(&self, name: &str) -> Result<usize> {
        self.find_column(name)
            .ok_or_else(|| eyre::Report::new(RecordError::NoSuchColumn(name.to_string())))
    }

    /// Encodes `value` into the column using its type's layout rules. An
    /// empty value blanks the field whatever its type.
    pub fn set(&mut self, col_idx: usize, value: &str) -> Result<()> {
        let policy = self.policy;
        let code_page = self.schema.code_page();
        let (col, field, blank) = self.field_mut(col_idx)?;

        if value.is_empty() {
            field.copy_from_slice(blank);
            return Ok(());
        }

        match col.field_type() {
            FieldType::Character => {
                codec::encode_character(col, field, blank, value, code_page, &policy)
            }
            FieldType::Number => codec::encode_number(col, field, blank, value, &policy),
            FieldType::Float => codec::encode_float(col, field, blank, value),
            FieldType::Integer => codec::encode_integer(col, field, value),
            FieldType::Boolean => {
                codec::encode_boolean(field, value);
                Ok(())
            }
            FieldType::Date => codec::encode_date_text(col, field, value),
            FieldType::Memo => Err(unsupported(col)),
            FieldType::Binary => Err(binary_only(col)),
        }
    }

    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<()> {
        let col_idx = self.resolve(name)?;
        self.set(col_idx, value)
    }

    pub fn set_null(&mut self, col_idx: usize) -> Result<()> {
        let (_, field, blank) = self.field_mut(col_idx)?;
        field.copy_from_slice(blank);
        Ok(())
    }

    /// Decodes the stored field, padding included. Integer fields decode to
    /// their decimal text.
    pub fn get(&self, col_idx: usize) -> Result<String> {
        let (col, field) = self.field(col_idx)?;
        match col.field_type() {
            FieldType::Character
            | FieldType::Number
            | FieldType::Float
            | FieldType::Boolean
            | FieldType::Date => Ok(codec::decode_text(field, self.schema.code_page())),
            FieldType::Integer => Ok(codec::decode_i32(field).to_string()),
            FieldType::Memo => Err(unsupported(col)),
            FieldType::Binary => Err(binary_only(col)),
        }
    }

    pub fn get_by_name(&self, name: &str) -> Result<String> {
        self.get(self.resolve(name)?)
    }

    pub fn get_trimmed(&self, col_idx: usize) -> Result<String> {
        let text = self.get(col_idx)?;
        Ok(text.trim().to_string())
    }

    pub fn get_raw(&self, col_idx: usize) -> Result<&[u8]> {
        Ok(self.field(col_idx)?.1)
    }

    pub fn get_date(&self, col_idx: usize) -> Result<Option<NaiveDate>> {
        let (col, field) = self.field(col_idx)?;
        require_type(col, FieldType::Date, "Date")?;
        codec::decode_date(col, field)
    }

    pub fn set_date(&mut self, col_idx: usize, date: NaiveDate) -> Result<()> {
        let (col, field, _) = self.field_mut(col_idx)?;
        require_type(col, FieldType::Date, "Date")?;
        codec::write_date(col, field, date)
    }

    pub fn get_i32(&self, col_idx: usize) -> Result<i32> {
        let (col, field) = self.field(col_idx)?;
        require_type(col, FieldType::Integer, "Integer")?;
        Ok(codec::decode_i32(field))
    }

    pub fn set_i32(&mut self, col_idx: usize, value: i32) -> Result<()> {
        let (col, field, _) = self.field_mut(col_idx)?;
        require_type(col, FieldType::Integer, "Integer")?;
        codec::write_i32(field, value);
        Ok(())
    }

    /// `None` when the stored logical is unknown (`?`) or blank.
    pub fn get_bool(&self, col_idx: usize) -> Result<Option<bool>> {
        let (col, field) = self.field(col_idx)?;
        require_type(col, FieldType::Boolean, "Boolean")?;
        codec::decode_boolean(col, field)
    }

    pub fn set_bool(&mut self, col_idx: usize, value: Option<bool>) -> Result<()> {
        let (col, field, _) = self.field_mut(col_idx)?;
        require_type(col, FieldType::Boolean, "Boolean")?;
        field[0] = match value {
            Some(true) => BOOL_TRUE,
            Some(false) => BOOL_FALSE,
            None => BOOL_UNKNOWN,
        };
        Ok(())
    }

    /// Parses a Number or Float field; `None` when the field is blank.
    pub fn get_f64(&self, col_idx: usize) -> Result<Option<f64>> {
        let (col, field) = self.field(col_idx)?;
        if !matches!(col.field_type(), FieldType::Number | FieldType::Float) {
            eyre::bail!(RecordError::TypeMismatch {
                column: col.name().to_string(),
                expected: "Number or Float",
                actual: col.field_type(),
            });
        }
        codec::decode_number(col, field, self.schema.code_page())
    }

    pub fn get_binary(&self, col_idx: usize) -> Result<&[u8]> {
        let (col, field) = self.field(col_idx)?;
        require_type(col, FieldType::Binary, "Binary")?;
        Ok(field)
    }

    /// Stores `bytes` at the start of a Binary field; the remainder of the
    /// field is reset to the blank template.
    pub fn set_binary(&mut self, col_idx: usize, bytes: &[u8]) -> Result<()> {
        let (col, field, blank) = self.field_mut(col_idx)?;
        require_type(col, FieldType::Binary, "Binary")?;
        if bytes.len() > field.len() {
            eyre::bail!(RecordError::Format {
                column: col.name().to_string(),
                value: format!("{} bytes", bytes.len()),
                reason: "binary payload longer than field",
            });
        }
        field.copy_from_slice(blank);
        field[..bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    pub fn get_value(&self, col_idx: usize) -> Result<FieldValue> {
        let (col, field) = self.field(col_idx)?;
        let code_page = self.schema.code_page();
        let value = match col.field_type() {
            FieldType::Character => {
                let text = codec::decode_text(field, code_page);
                FieldValue::Text(text.trim_end().to_string())
            }
            FieldType::Number | FieldType::Float => {
                match codec::decode_number(col, field, code_page)? {
                    Some(n) => FieldValue::Number(n),
                    None => FieldValue::Null,
                }
            }
            FieldType::Integer => FieldValue::Integer(codec::decode_i32(field)),
            FieldType::Boolean => match codec::decode_boolean(col, field)? {
                Some(b) => FieldValue::Boolean(b),
                None => FieldValue::Null,
            },
            FieldType::Date => match codec::decode_date(col, field)? {
                Some(d) => FieldValue::Date(d),
                None => FieldValue::Null,
            },
            FieldType::Binary => FieldValue::Binary(field.to_vec()),
            FieldType::Memo => return Err(unsupported(col)),
        };
        Ok(value)
    }

    /// Emits the whole record in one `write_all`.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(&self.data)
    }

    /// Writes the record, then clears the buffer once the write succeeded.
    pub fn write_and_clear<W: Write + ?Sized>(&mut self, sink: &mut W) -> io::Result<()> {
        self.write_to(sink)?;
        self.clear();
        Ok(())
    }

    /// Fills the buffer with the next `record_len` bytes of `source`.
    /// Returns `Ok(false)` when the source ran out first.
    pub fn read_from<R: Read + ?Sized>(&mut self, source: &mut R) -> io::Result<bool> {
        let mut filled = 0;
        while filled < self.data.len() {
            match source.read(&mut self.data[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled == self.data.len())
    }
}
