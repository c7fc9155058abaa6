//! # Field Codec
//!
//! Per-type rules that turn a caller value into the exact bytes of one field
//! and back. Every encoder validates its input completely before touching
//! the field, so a rejected value leaves the previous bytes in place.
//!
//! ## Number Layout
//!
//! ```text
//! N(8,2) "3.1"   ->  [' ',' ',' ',' ','3','.','1','0']
//! N(5,0) "-42"   ->  [' ',' ','-','4','2']
//!                     |<- integer_width ->|.|<- decimals ->|
//! ```
//!
//! The sign counts toward the integer width. Integer overflow keeps the
//! rightmost bytes, fractional overflow keeps the leftmost digits; neither
//! rounds. Digits are counted as written, so leading integer zeros and
//! trailing fractional zeros take part in both width checks.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use eyre::Result;

use crate::config::{
    TruncationPolicy, BLANK, BOOL_FALSE, BOOL_TRUE, BOOL_UNKNOWN, DATE_FIELD_LEN,
    DECIMAL_POINT, DECIMAL_ZERO_FILL, INTEGER_FIELD_LEN, MAX_DATE_YEAR, MIN_DATE_YEAR,
};
use crate::error::{RecordError, TruncationKind};
use crate::schema::ColumnDef;
use crate::types::CodePage;

const TRUE_SPELLINGS: [&str; 5] = ["true", "1", "t", "yes", "y"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn format_error(col: &ColumnDef, value: &str, reason: &'static str) -> eyre::Report {
    eyre::Report::new(RecordError::Format {
        column: col.name().to_string(),
        value: value.to_string(),
        reason,
    })
}

/// Fails unless `policy` permits dropping `len - max` units along `kind`.
fn permit_truncation(
    col: &ColumnDef,
    policy: &TruncationPolicy,
    kind: TruncationKind,
    len: usize,
    max: usize,
) -> Result<()> {
    if !policy.allows(kind) {
        eyre::bail!(RecordError::Truncation {
            column: col.name().to_string(),
            kind,
            len,
            max,
        });
    }
    tracing::trace!(column = col.name(), %kind, len, max, "truncating value");
    Ok(())
}

pub(crate) fn encode_character(
    col: &ColumnDef,
    field: &mut [u8],
    blank: &[u8],
    text: &str,
    code_page: CodePage,
    policy: &TruncationPolicy,
) -> Result<()> {
    let len = code_page.encoded_len(text);
    if len > field.len() {
        permit_truncation(col, policy, TruncationKind::String, len, field.len())?;
    }
    field.copy_from_slice(blank);
    code_page.encode_into(text, field);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumericParts<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

fn split_numeric(text: &str) -> Option<NumericParts<'_>> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !all_digits(integer) || !all_digits(fraction)
    {
        return None;
    }

    Some(NumericParts {
        negative,
        integer: if integer.is_empty() { "0" } else { integer },
        fraction,
    })
}

pub(crate) fn encode_number(
    col: &ColumnDef,
    field: &mut [u8],
    blank: &[u8],
    text: &str,
    policy: &TruncationPolicy,
) -> Result<()> {
    let trimmed = text.trim();
    let parts =
        split_numeric(trimmed).ok_or_else(|| format_error(col, text, "not a decimal number"))?;

    let decimals = col.decimal_count();
    let int_width = col.integer_width();

    let int_len = parts.integer.len() + usize::from(parts.negative);
    if int_len > int_width {
        permit_truncation(col, policy, TruncationKind::IntegerDigits, int_len, int_width)?;
    }

    if parts.fraction.len() > decimals {
        permit_truncation(
            col,
            policy,
            TruncationKind::DecimalDigits,
            parts.fraction.len(),
            decimals,
        )?;
    }

    field.copy_from_slice(blank);

    let int_region = &mut field[..int_width];
    let mut pos = int_width;
    for digit in parts.integer.bytes().rev() {
        if pos == 0 {
            break;
        }
        pos -= 1;
        int_region[pos] = digit;
    }
    if parts.negative && pos > 0 {
        int_region[pos - 1] = b'-';
    }

    if decimals > 0 {
        field[int_width] = DECIMAL_POINT;
        let frac_region = &mut field[int_width + 1..];
        let copied = parts.fraction.len().min(decimals);
        frac_region[..copied].copy_from_slice(&parts.fraction.as_bytes()[..copied]);
        frac_region[copied..].copy_from_slice(&DECIMAL_ZERO_FILL[..decimals - copied]);
    }
    Ok(())
}

pub(crate) fn encode_float(
    col: &ColumnDef,
    field: &mut [u8],
    blank: &[u8],
    text: &str,
) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.len() > field.len() {
        return Err(format_error(col, text, "numeral wider than field"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => {}
        _ => return Err(format_error(col, text, "not a real number")),
    }
    field.copy_from_slice(blank);
    field[..trimmed.len()].copy_from_slice(trimmed.as_bytes());
    Ok(())
}

pub(crate) fn encode_integer(col: &ColumnDef, field: &mut [u8], text: &str) -> Result<()> {
    let value = text
        .trim()
        .parse::<i32>()
        .map_err(|_| format_error(col, text, "not a 32-bit integer"))?;
    write_i32(field, value);
    Ok(())
}

pub(crate) fn write_i32(field: &mut [u8], value: i32) {
    field[..INTEGER_FIELD_LEN].copy_from_slice(&value.to_ne_bytes());
}

pub(crate) fn encode_boolean(field: &mut [u8], text: &str) {
    let trimmed = text.trim();
    field[0] = if trimmed.is_empty() || trimmed == "?" {
        BOOL_UNKNOWN
    } else if TRUE_SPELLINGS
        .iter()
        .any(|spelling| trimmed.eq_ignore_ascii_case(spelling))
    {
        BOOL_TRUE
    } else {
        BOOL_FALSE
    };
}

pub(crate) fn encode_date_text(col: &ColumnDef, field: &mut [u8], text: &str) -> Result<()> {
    let date = parse_date_input(text.trim())
        .ok_or_else(|| format_error(col, text, "not a calendar date"))?;
    write_date(col, field, date)
}

pub(crate) fn write_date(col: &ColumnDef, field: &mut [u8], date: NaiveDate) -> Result<()> {
    let year = date.year();
    if !(MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&year) {
        return Err(format_error(
            col,
            &date.to_string(),
            "year outside 0000..=9999",
        ));
    }

    let mut digits = [b'0'; DATE_FIELD_LEN];
    put_digits(&mut digits[0..4], year as u32);
    put_digits(&mut digits[4..6], date.month());
    put_digits(&mut digits[6..8], date.day());
    field[..DATE_FIELD_LEN].copy_from_slice(&digits);
    Ok(())
}

fn put_digits(out: &mut [u8], mut value: u32) {
    for slot in out.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

fn parse_compact_date(bytes: &[u8]) -> Option<NaiveDate> {
    if bytes.len() != DATE_FIELD_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let number = |range: std::ops::Range<usize>| {
        bytes[range]
            .iter()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
    };
    NaiveDate::from_ymd_opt(number(0..4) as i32, number(4..6), number(6..8))
}

fn parse_date_input(text: &str) -> Option<NaiveDate> {
    parse_compact_date(text.as_bytes())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

pub(crate) fn decode_text(field: &[u8], code_page: CodePage) -> String {
    code_page.decode(field)
}

pub(crate) fn decode_i32(field: &[u8]) -> i32 {
    let mut bytes = [0u8; INTEGER_FIELD_LEN];
    bytes.copy_from_slice(&field[..INTEGER_FIELD_LEN]);
    i32::from_ne_bytes(bytes)
}

/// `None` for an all-blank field; stored bytes that are not a valid
/// `YYYYMMDD` date indicate a corrupt record.
pub(crate) fn decode_date(col: &ColumnDef, field: &[u8]) -> Result<Option<NaiveDate>> {
    if field.iter().all(|&b| b == BLANK) {
        return Ok(None);
    }
    match parse_compact_date(field) {
        Some(date) => Ok(Some(date)),
        None => Err(format_error(
            col,
            &String::from_utf8_lossy(field),
            "stored date is not YYYYMMDD",
        )),
    }
}

pub(crate) fn decode_boolean(col: &ColumnDef, field: &[u8]) -> Result<Option<bool>> {
    match field[0] {
        b'T' | b't' | b'Y' | b'y' => Ok(Some(true)),
        b'F' | b'f' | b'N' | b'n' => Ok(Some(false)),
        BOOL_UNKNOWN | BLANK => Ok(None),
        _ => Err(format_error(
            col,
            &String::from_utf8_lossy(&field[..1]),
            "stored logical is not T, F or ?",
        )),
    }
}

pub(crate) fn decode_number(
    col: &ColumnDef,
    field: &[u8],
    code_page: CodePage,
) -> Result<Option<f64>> {
    let text = decode_text(field, code_page);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format_error(col, trimmed, "stored number is not numeric"))
}
