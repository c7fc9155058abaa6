//! # Column Descriptor
//!
//! Immutable per-column metadata. A `ColumnDef` only exists inside a
//! finalized [`Schema`](super::Schema), so its offset and length are already
//! known to lie within the record and not to overlap any other column.

use std::ops::Range;

use crate::types::FieldType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    name: String,
    field_type: FieldType,
    offset: usize,
    length: usize,
    decimal_count: usize,
}

impl ColumnDef {
    pub(crate) fn new(
        name: String,
        field_type: FieldType,
        offset: usize,
        length: usize,
        decimal_count: usize,
    ) -> Self {
        Self {
            name,
            field_type,
            offset,
            length,
            decimal_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Position of the first byte of this field within the record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn decimal_count(&self) -> usize {
        self.decimal_count
    }

    pub fn byte_range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }

    /// Bytes available to the integer part of a Number field, sign included.
    pub fn integer_width(&self) -> usize {
        if self.decimal_count == 0 {
            self.length
        } else {
            self.length - self.decimal_count - 1
        }
    }
}
