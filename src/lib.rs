//! # dbf-codec - Fixed-Width dBASE Record Codec
//!
//! Converts between named, typed column values and the exact bytes of one
//! dBASE table row. Each column type has its own layout rules, and every
//! field occupies a fixed number of bytes, so the codec's job is to produce
//! those bytes exactly: padding, sign and decimal placement, truncation.
//!
//! ## Quick Start
//!
//! ```ignore
//! use dbf_codec::{RecordBuffer, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .character("NAME", 20)
//!     .number("PRICE", 8, 2)
//!     .date("SOLD")
//!     .build()?;
//!
//! let mut record = RecordBuffer::new(schema);
//! record.set_by_name("NAME", "Widget")?;
//! record.set_by_name("PRICE", "3.1")?;        // "    3.10"
//! record.set_by_name("SOLD", "2024-01-15")?;  // "20240115"
//! record.write_and_clear(&mut file)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  caller: table reader / writer      │
//! ├─────────────────────────────────────┤
//! │  RecordBuffer (typed get / set)     │
//! ├──────────────────┬──────────────────┤
//! │  field codec     │  TruncationPolicy│
//! ├──────────────────┴──────────────────┤
//! │  Schema (columns, index, template)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! The codec never decides file layout. The table header that owns the
//! schema, the stream that sequences records, the header block and the
//! end-of-file marker all belong to the caller; a `RecordBuffer` only reads
//! and writes its own `record_len` bytes.
//!
//! ## Module Overview
//!
//! - [`config`]: format constants and the truncation policy
//! - [`error`]: `RecordError` and its categories
//! - [`types`]: `FieldType` and single-byte `CodePage`s
//! - [`schema`]: `SchemaBuilder`, `Schema`, `ColumnDef`
//! - [`record`]: `RecordBuffer` and `FieldValue`

pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod types;

pub use config::TruncationPolicy;
pub use error::{ErrorCategory, RecordError, TruncationKind};
pub use record::{FieldValue, RecordBuffer};
pub use schema::{ColumnDef, Schema, SchemaBuilder};
pub use types::{CodePage, FieldType};
