//! # Record Format Constants
//!
//! Byte values and limits mandated by the dBASE record layout. Everything the
//! codec writes that is not caller data comes from this module.
//!
//! ```text
//! byte 0      1 ........................................ record_length-1
//! +--------+-----------+-----------+-----------+ ... +-----------+
//! | marker | field 0   | field 1   | field 2   |     | field N-1 |
//! +--------+-----------+-----------+-----------+ ... +-----------+
//!   '*' deleted, ' ' active
//! ```
//!
//! ## Field Width Limits
//!
//! | Type | Width |
//! |------|-------|
//! | Boolean | 1 |
//! | Integer | 4 |
//! | Date | 8 |
//! | Memo | 10 |
//! | others | 1..=255 |

/// Deletion marker stored in byte 0 of a soft-deleted record.
pub const DELETED_MARKER: u8 = b'*';

/// Deletion marker stored in byte 0 of an active record.
pub const ACTIVE_MARKER: u8 = b' ';

/// Padding byte for text-bearing fields.
pub const BLANK: u8 = b' ';

/// Padding byte for binary fields (Integer, Binary).
pub const BINARY_BLANK: u8 = 0x00;

pub const DECIMAL_POINT: u8 = b'.';

pub const BOOL_TRUE: u8 = b'T';
pub const BOOL_FALSE: u8 = b'F';
pub const BOOL_UNKNOWN: u8 = b'?';

/// Size of the leading deletion marker; the first field starts here.
pub const DELETION_MARKER_LEN: usize = 1;

pub const MAX_FIELD_LEN: usize = 255;
pub const MAX_FIELD_NAME_LEN: usize = 10;
pub const MAX_RECORD_LEN: usize = u16::MAX as usize;

pub const BOOLEAN_FIELD_LEN: usize = 1;
pub const INTEGER_FIELD_LEN: usize = 4;
pub const DATE_FIELD_LEN: usize = 8;
pub const MEMO_FIELD_LEN: usize = 10;

/// Shared zero fill for fractional digits of fixed-point numbers.
pub const DECIMAL_ZERO_FILL: [u8; MAX_FIELD_LEN] = [b'0'; MAX_FIELD_LEN];

/// Year range representable by the 8-digit `YYYYMMDD` date layout.
pub const MIN_DATE_YEAR: i32 = 0;
pub const MAX_DATE_YEAR: i32 = 9999;

const _: () = assert!(DATE_FIELD_LEN == 8);
const _: () = assert!(INTEGER_FIELD_LEN == std::mem::size_of::<i32>());
