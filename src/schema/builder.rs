//! # SchemaBuilder - Schema Finalization
//!
//! Columns are declared in record order; `build` assigns offsets, validates
//! every descriptor and produces an immutable [`Schema`]. A finalized schema
//! can never gain, lose or resize a column, which is what keeps every record
//! written against it byte-compatible.
//!
//! ```ignore
//! let schema = SchemaBuilder::new()
//!     .character("NAME", 20)
//!     .number("PRICE", 8, 2)
//!     .date("SOLD")
//!     .build()?;
//! assert_eq!(schema.record_len(), 1 + 20 + 8 + 8);
//! ```

use std::sync::Arc;

use eyre::Result;
use hashbrown::HashMap;

use crate::config::{
    ACTIVE_MARKER, BINARY_BLANK, BLANK, DELETION_MARKER_LEN, MAX_FIELD_LEN, MAX_FIELD_NAME_LEN,
    MAX_RECORD_LEN,
};
use crate::error::RecordError;
use crate::schema::column::ColumnDef;
use crate::schema::{normalized_name, Schema};
use crate::types::{CodePage, FieldType};

#[derive(Debug, Clone)]
struct PendingColumn {
    name: String,
    field_type: FieldType,
    length: usize,
    decimal_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    columns: Vec<PendingColumn>,
    code_page: CodePage,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code_page(mut self, code_page: CodePage) -> Self {
        self.code_page = code_page;
        self
    }

    /// Declares a column. A `length` of 0 on a fixed-width type selects the
    /// width the format mandates.
    pub fn column(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        length: usize,
        decimal_count: usize,
    ) -> Self {
        let length = match (length, field_type.fixed_len()) {
            (0, Some(fixed)) => fixed,
            _ => length,
        };
        self.columns.push(PendingColumn {
            name: name.into(),
            field_type,
            length,
            decimal_count,
        });
        self
    }

    /// Declares a column from its raw header tag byte.
    pub fn column_tagged(
        self,
        name: impl Into<String>,
        tag: u8,
        length: usize,
        decimal_count: usize,
    ) -> Result<Self> {
        let field_type = FieldType::from_tag(tag)?;
        Ok(self.column(name, field_type, length, decimal_count))
    }

    pub fn character(self, name: impl Into<String>, length: usize) -> Self {
        self.column(name, FieldType::Character, length, 0)
    }

    pub fn number(self, name: impl Into<String>, length: usize, decimal_count: usize) -> Self {
        self.column(name, FieldType::Number, length, decimal_count)
    }

    pub fn float(self, name: impl Into<String>, length: usize, decimal_count: usize) -> Self {
        self.column(name, FieldType::Float, length, decimal_count)
    }

    pub fn integer(self, name: impl Into<String>) -> Self {
        self.column(name, FieldType::Integer, 0, 0)
    }

    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.column(name, FieldType::Boolean, 0, 0)
    }

    pub fn date(self, name: impl Into<String>) -> Self {
        self.column(name, FieldType::Date, 0, 0)
    }

    pub fn memo(self, name: impl Into<String>) -> Self {
        self.column(name, FieldType::Memo, 0, 0)
    }

    pub fn binary(self, name: impl Into<String>, length: usize) -> Self {
        self.column(name, FieldType::Binary, length, 0)
    }

    pub fn build(self) -> Result<Arc<Schema>> {
        if self.columns.is_empty() {
            invalid("schema has no columns")?;
        }

        let mut columns = Vec::with_capacity(self.columns.len());
        let mut name_index: HashMap<Box<str>, usize> = HashMap::with_capacity(self.columns.len());
        let mut offset = DELETION_MARKER_LEN;

        for (idx, pending) in self.columns.into_iter().enumerate() {
            validate_column(&pending)?;

            let key = normalized_name(&pending.name);
            let key = std::str::from_utf8(&key)?;
            if name_index.insert(key.into(), idx).is_some() {
                invalid(format!("duplicate column name '{}'", pending.name))?;
            }

            columns.push(ColumnDef::new(
                pending.name,
                pending.field_type,
                offset,
                pending.length,
                pending.decimal_count,
            ));
            offset += pending.length;
        }

        let record_len = offset;
        if record_len > MAX_RECORD_LEN {
            invalid(format!(
                "record length {} exceeds {}",
                record_len, MAX_RECORD_LEN
            ))?;
        }

        let mut blank = vec![BLANK; record_len];
        blank[0] = ACTIVE_MARKER;
        for col in columns.iter().filter(|c| c.field_type().is_binary()) {
            blank[col.byte_range()].fill(BINARY_BLANK);
        }

        tracing::debug!(
            columns = columns.len(),
            record_len,
            code_page = ?self.code_page,
            "schema finalized"
        );

        Ok(Arc::new(Schema {
            columns,
            name_index,
            blank: blank.into_boxed_slice(),
            code_page: self.code_page,
        }))
    }
}

fn invalid(reason: impl Into<String>) -> Result<()> {
    eyre::bail!(RecordError::InvalidSchema(reason.into()))
}

fn validate_column(col: &PendingColumn) -> Result<()> {
    let name = &col.name;
    if name.is_empty() {
        invalid("column name is empty")?;
    }
    if !name.is_ascii() {
        invalid(format!("column name '{}' is not ASCII", name))?;
    }
    if name.len() > MAX_FIELD_NAME_LEN {
        invalid(format!(
            "column name '{}' is longer than {} bytes",
            name, MAX_FIELD_NAME_LEN
        ))?;
    }
    if col.length == 0 || col.length > MAX_FIELD_LEN {
        invalid(format!(
            "column '{}' length {} outside 1..={}",
            name, col.length, MAX_FIELD_LEN
        ))?;
    }
    if let Some(fixed) = col.field_type.fixed_len() {
        if col.length != fixed {
            invalid(format!(
                "column '{}' of type {:?} must be {} bytes, got {}",
                name, col.field_type, fixed, col.length
            ))?;
        }
    }
    if col.decimal_count > 0 {
        if !col.field_type.supports_decimals() {
            invalid(format!(
                "column '{}' of type {:?} cannot have decimals",
                name, col.field_type
            ))?;
        }
        if col.decimal_count + 2 > col.length {
            invalid(format!(
                "column '{}' has {} decimals but only {} bytes",
                name, col.decimal_count, col.length
            ))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_error(result: Result<Arc<Schema>>) -> RecordError {
        result
            .unwrap_err()
            .downcast_ref::<RecordError>()
            .cloned()
            .unwrap()
    }

    #[test]
    fn offsets_start_after_deletion_marker() {
        let schema = SchemaBuilder::new()
            .character("NAME", 10)
            .number("QTY", 5, 0)
            .boolean("ACTIVE")
            .build()
            .unwrap();

        assert_eq!(schema.column(0).unwrap().offset(), 1);
        assert_eq!(schema.column(1).unwrap().offset(), 11);
        assert_eq!(schema.column(2).unwrap().offset(), 16);
        assert_eq!(schema.record_len(), 17);
    }

    #[test]
    fn fixed_types_get_mandated_width() {
        let schema = SchemaBuilder::new()
            .integer("ID")
            .date("BORN")
            .memo("NOTES")
            .build()
            .unwrap();

        assert_eq!(schema.column(0).unwrap().length(), 4);
        assert_eq!(schema.column(1).unwrap().length(), 8);
        assert_eq!(schema.column(2).unwrap().length(), 10);
    }

    #[test]
    fn blank_template_zeroes_binary_fields() {
        let schema = SchemaBuilder::new()
            .character("A", 2)
            .integer("B")
            .binary("C", 3)
            .build()
            .unwrap();

        assert_eq!(schema.blank_record(), b"   \0\0\0\0\0\0\0");
    }

    #[test]
    fn rejects_duplicate_names_ignoring_case() {
        let err = schema_error(
            SchemaBuilder::new()
                .character("Name", 4)
                .character("NAME", 4)
                .build(),
        );
        assert!(matches!(err, RecordError::InvalidSchema(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn rejects_wrong_fixed_width() {
        let err = schema_error(
            SchemaBuilder::new()
                .column("FLAG", FieldType::Boolean, 2, 0)
                .build(),
        );
        assert!(matches!(err, RecordError::InvalidSchema(_)));
    }

    #[test]
    fn rejects_decimals_without_room_for_point() {
        let err = schema_error(SchemaBuilder::new().number("AMT", 3, 2).build());
        assert!(matches!(err, RecordError::InvalidSchema(msg) if msg.contains("decimals")));
    }

    #[test]
    fn rejects_long_and_empty_names() {
        assert!(SchemaBuilder::new().character("", 1).build().is_err());
        assert!(SchemaBuilder::new()
            .character("ELEVENCHARS", 1)
            .build()
            .is_err());
        assert!(SchemaBuilder::new().build().is_err());
    }

    #[test]
    fn column_tagged_rejects_unknown_tag() {
        let err = SchemaBuilder::new()
            .column_tagged("X", b'Z', 4, 0)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::UnknownFieldType(b'Z'))
        );
    }
}
