//! # dBASE Field Types
//!
//! The closed set of column types a record can carry. The discriminant is the
//! ASCII tag byte the table header stores for the column, so converting a
//! header tag is a single match.
//!
//! | Type | Tag | Storage |
//! |------|-----|---------|
//! | Character | `C` | text, left-justified, blank padded |
//! | Number | `N` | digits, right-justified, optional fixed decimal point |
//! | Float | `F` | formatted numeral, left-justified |
//! | Integer | `I` | 4 raw bytes, native-endian `i32` |
//! | Memo | `M` | pointer into a memo file (unsupported) |
//! | Boolean | `L` | one of `T`, `F`, `?` |
//! | Date | `D` | `YYYYMMDD` |
//! | Binary | `B` | opaque bytes |

use eyre::Result;

use crate::config::{BOOLEAN_FIELD_LEN, DATE_FIELD_LEN, INTEGER_FIELD_LEN, MEMO_FIELD_LEN};
use crate::error::RecordError;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Character = b'C',
    Number = b'N',
    Float = b'F',
    Integer = b'I',
    Memo = b'M',
    Boolean = b'L',
    Date = b'D',
    Binary = b'B',
}

impl FieldType {
    pub fn tag(&self) -> u8 {
        *self as u8
    }

    pub fn from_tag(tag: u8) -> Result<Self> {
        let field_type = match tag.to_ascii_uppercase() {
            b'C' => FieldType::Character,
            b'N' => FieldType::Number,
            b'F' => FieldType::Float,
            b'I' => FieldType::Integer,
            b'M' => FieldType::Memo,
            b'L' => FieldType::Boolean,
            b'D' => FieldType::Date,
            b'B' => FieldType::Binary,
            _ => eyre::bail!(RecordError::UnknownFieldType(tag)),
        };
        Ok(field_type)
    }

    /// Width mandated by the format, or None when the schema chooses it.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            FieldType::Boolean => Some(BOOLEAN_FIELD_LEN),
            FieldType::Integer => Some(INTEGER_FIELD_LEN),
            FieldType::Date => Some(DATE_FIELD_LEN),
            FieldType::Memo => Some(MEMO_FIELD_LEN),
            FieldType::Character | FieldType::Number | FieldType::Float | FieldType::Binary => {
                None
            }
        }
    }

    pub fn supports_decimals(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Float)
    }

    /// Binary-payload types are blanked with zero bytes instead of spaces.
    pub fn is_binary(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Binary)
    }
}

impl TryFrom<u8> for FieldType {
    type Error = eyre::Report;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        FieldType::from_tag(tag)
    }
}
