//! # Table Schema
//!
//! A finalized, immutable description of the record layout: the column
//! descriptors, the record length, the code page of text fields, the
//! column-name index and the blank record template.
//!
//! Schemas are only produced by [`SchemaBuilder::build`] and are shared via
//! `Arc` by every [`RecordBuffer`](crate::record::RecordBuffer) of the table.
//! Nothing in a `Schema` is mutable, so sharing it across threads is safe.
//!
//! ## Column Names
//!
//! Column-name lookup is ASCII case-insensitive on every path (`column_index`,
//! `RecordBuffer::find_column` and the by-name setters and getters). Names are
//! restricted to ASCII at build time, so the folded key is always valid UTF-8.
//!
//! ## Blank Template
//!
//! | Region | Blank byte |
//! |--------|------------|
//! | deletion marker | `' '` |
//! | Character, Number, Float, Boolean, Date, Memo | `' '` |
//! | Integer, Binary | `0x00` |

mod builder;
mod column;

pub use builder::SchemaBuilder;
pub use column::ColumnDef;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::CodePage;

pub(crate) type NameKey = SmallVec<[u8; 16]>;

pub(crate) fn normalized_name(name: &str) -> NameKey {
    name.bytes().map(|b| b.to_ascii_uppercase()).collect()
}

#[derive(Debug)]
pub struct Schema {
    pub(crate) columns: Vec<ColumnDef>,
    pub(crate) name_index: HashMap<Box<str>, usize>,
    pub(crate) blank: Box<[u8]>,
    pub(crate) code_page: CodePage,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnDef> {
        self.columns.get(idx)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        let key = normalized_name(name);
        let key = std::str::from_utf8(&key).ok()?;
        self.name_index.get(key).copied()
    }

    pub fn column_by_name(&self, name: &str) -> Option<&ColumnDef> {
        self.column_index(name).and_then(|idx| self.columns.get(idx))
    }

    /// Total bytes per record, deletion marker included.
    pub fn record_len(&self) -> usize {
        self.blank.len()
    }

    pub fn blank_record(&self) -> &[u8] {
        &self.blank
    }

    pub fn code_page(&self) -> CodePage {
        self.code_page
    }
}
