//! # Record Codec
//!
//! Converts between typed column values and the fixed-width bytes of one
//! table row.
//!
//! ## Record Binary Layout
//!
//! ```text
//! +--------+----------------+----------------+-----+----------------+
//! | marker | field 0        | field 1        | ... | field N-1      |
//! | 1 byte | length[0] B    | length[1] B    |     | length[N-1] B  |
//! +--------+----------------+----------------+-----+----------------+
//! ```
//!
//! There are no delimiters and no per-record header: every byte position is
//! fixed by the schema, so a single off-by-one write shifts every field that
//! follows it.
//!
//! ## Field Encodings
//!
//! | Type | Bytes |
//! |------|-------|
//! | Character | code-page text, left-justified, blank padded |
//! | Number | `<blanks><digits>[.<decimals>]`, right-justified |
//! | Float | numeral text, left-justified, blank padded |
//! | Integer | native-endian `i32` |
//! | Boolean | `T`, `F` or `?` |
//! | Date | `YYYYMMDD` |
//! | Binary | raw bytes via `set_binary` / `get_binary` |
//! | Memo | unsupported |
//!
//! ## Module Structure
//!
//! - `buffer`: `RecordBuffer`, the reusable row buffer and its accessors
//! - `codec`: per-type encode and decode rules
//! - `value`: `FieldValue`, the typed decoded form of a field

mod buffer;
mod codec;
mod value;


pub use buffer::RecordBuffer;
pub use value::FieldValue;
