//! # Single-Byte Code Pages
//!
//! Text fields are stored one byte per character in the table's declared code
//! page. Characters the code page cannot represent are written as `?`, so the
//! encoded length of a string is always its character count.

const SUBSTITUTE: u8 = b'?';

/// Windows-1252 assignments for 0x80..=0x9F. `None` marks the five unassigned
/// slots, which decode to the matching C1 control character.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodePage {
    Ascii,
    #[default]
    Latin1,
    Windows1252,
}

impl CodePage {
    pub fn encode_char(&self, c: char) -> u8 {
        let code = c as u32;
        match self {
            CodePage::Ascii if code < 0x80 => code as u8,
            CodePage::Ascii => SUBSTITUTE,
            CodePage::Latin1 if code <= 0xFF => code as u8,
            CodePage::Latin1 => SUBSTITUTE,
            CodePage::Windows1252 => {
                if code < 0x80 || (0xA0..=0xFF).contains(&code) {
                    return code as u8;
                }
                CP1252_HIGH
                    .iter()
                    .position(|&mapped| mapped == Some(c))
                    .map(|pos| 0x80 + pos as u8)
                    .unwrap_or(SUBSTITUTE)
            }
        }
    }

    pub fn decode_byte(&self, byte: u8) -> char {
        match self {
            CodePage::Ascii if byte < 0x80 => byte as char,
            CodePage::Ascii => char::REPLACEMENT_CHARACTER,
            CodePage::Latin1 => byte as char,
            CodePage::Windows1252 => match byte {
                0x80..=0x9F => CP1252_HIGH[(byte - 0x80) as usize].unwrap_or(byte as char),
                _ => byte as char,
            },
        }
    }

    /// Number of bytes `text` occupies once encoded.
    pub fn encoded_len(&self, text: &str) -> usize {
        text.chars().count()
    }

    /// Encodes as much of `text` as fits into `out`; returns bytes written.
    pub fn encode_into(&self, text: &str, out: &mut [u8]) -> usize {
        let mut written = 0;
        for (slot, c) in out.iter_mut().zip(text.chars()) {
            *slot = self.encode_char(c);
            written += 1;
        }
        written
    }

    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().map(|c| self.encode_char(c)).collect()
    }

    pub fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.decode_byte(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_substitutes_non_ascii() {
        assert_eq!(CodePage::Ascii.encode("café"), b"caf?".to_vec());
        assert_eq!(CodePage::Ascii.decode(&[b'a', 0xE9]), "a\u{FFFD}");
    }

    #[test]
    fn latin1_maps_bytes_one_to_one() {
        assert_eq!(CodePage::Latin1.encode("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(CodePage::Latin1.decode(&[b'c', b'a', b'f', 0xE9]), "café");
        assert_eq!(CodePage::Latin1.encode("€"), vec![b'?']);
    }

    #[test]
    fn windows1252_maps_high_block() {
        assert_eq!(CodePage::Windows1252.encode("€5"), vec![0x80, b'5']);
        assert_eq!(CodePage::Windows1252.decode(&[0x80, 0x99]), "€™");
        assert_eq!(CodePage::Windows1252.decode(&[0x81]), "\u{81}");
    }

    #[test]
    fn encode_into_stops_at_buffer_end() {
        let mut out = [b' '; 3];
        let written = CodePage::Latin1.encode_into("HELLO", &mut out);
        assert_eq!(written, 3);
        assert_eq!(&out, b"HEL");
        assert_eq!(CodePage::Latin1.encoded_len("HELLO"), 5);
    }
}
