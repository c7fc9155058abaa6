//! # Column Types
//!
//! - `field_type`: the `FieldType` enum and its header tag bytes
//! - `code_page`: single-byte text encodings used by text fields

mod code_page;
mod field_type;

pub use code_page::CodePage;
pub use field_type::FieldType;
