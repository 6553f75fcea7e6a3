use std::fmt::{Display, Formatter};
use std::ops::{Deref, Range};

use crate::common::error::{QrError, QrResult};
use crate::common::metadata::{ECLevel, Version, MODE_INDICATOR_BITS};

// Mode indicator
//------------------------------------------------------------------------------

/// Every 4 bit mode indicator defined for model 2 symbols. Only the payload
/// modes wrapped by [`Mode`] and a single byte ECI header can be encoded.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ModeIndicator {
    Terminator = 0b0000,
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    StructuredAppend = 0b0011,
    Byte = 0b0100,
    Fnc1First = 0b0101,
    Eci = 0b0111,
    Kanji = 0b1000,
    Fnc1Second = 0b1001,
}

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl From<Mode> for ModeIndicator {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Numeric => Self::Numeric,
            Mode::Alphanumeric => Self::Alphanumeric,
            Mode::Byte => Self::Byte,
            Mode::Kanji => Self::Kanji,
        }
    }
}

impl TryFrom<ModeIndicator> for Mode {
    type Error = QrError;

    fn try_from(indicator: ModeIndicator) -> QrResult<Self> {
        match indicator {
            ModeIndicator::Numeric => Ok(Self::Numeric),
            ModeIndicator::Alphanumeric => Ok(Self::Alphanumeric),
            ModeIndicator::Byte => Ok(Self::Byte),
            ModeIndicator::Kanji => Ok(Self::Kanji),
            ModeIndicator::Terminator => Err(QrError::NotSupported("terminator has no character count")),
            ModeIndicator::StructuredAppend => Err(QrError::NotSupported("structured append")),
            ModeIndicator::Fnc1First | ModeIndicator::Fnc1Second => Err(QrError::NotSupported("FNC1")),
            ModeIndicator::Eci => Err(QrError::NotSupported("ECI as a segment mode")),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Numeric => "Numeric",
            Self::Alphanumeric => "Alphanumeric",
            Self::Byte => "Byte",
            Self::Kanji => "Kanji",
        };
        f.write_str(s)
    }
}

impl Mode {
    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        ALPHANUMERIC_VALUES[(char - b' ') as usize] as u16
    }

    /// Packs one group: up to 3 digits, up to 2 alphanumeric characters, a
    /// single byte or a single Shift-JIS pair.
    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => {
                debug_assert!(len == 2, "Kanji chunk must be a byte pair: {len}");
                let value = kanji_value(data[0], data[1]);
                debug_assert!(value.is_some(), "Invalid kanji pair: {:02X}{:02X}", data[0], data[1]);
                value.unwrap_or_default()
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                (b' '..=b'Z').contains(&byte) && ALPHANUMERIC_VALUES[(byte - b' ') as usize] != INVALID
            }
            Self::Byte => true,
            // Pairs are checked as a whole
            Self::Kanji => true,
        }
    }

    /// Number of characters `byte_len` input bytes amount to.
    pub fn char_count(&self, byte_len: usize) -> usize {
        match self {
            Self::Kanji => byte_len / 2,
            _ => byte_len,
        }
    }

    /// Payload bits for `len` input bytes, without any header.
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => (len / 2) * 13,
        }
    }
}

/// Compact 13 bit value of a Shift-JIS pair, or `None` when the pair is not
/// representable in kanji mode.
pub fn kanji_value(hi: u8, lo: u8) -> Option<u16> {
    if !(0x40..=0xFC).contains(&lo) || lo == 0x7F {
        return None;
    }
    let sjis = u16::from_be_bytes([hi, lo]);
    let offset = match sjis {
        0x8140..=0x9FFC => sjis - 0x8140,
        0xE040..=0xEBBF => sjis - 0xC140,
        _ => return None,
    };
    Some((offset >> 8) * 0xC0 + (offset & 0xFF))
}

#[cfg(test)]
mod mode_tests {
    use super::Mode::*;
    use super::{kanji_value, Mode, ModeIndicator};
    use crate::common::error::QrError;

    #[test]
    fn test_indicator_conversion() {
        assert_eq!(ModeIndicator::from(Kanji) as u8, 0b1000);
        assert_eq!(ModeIndicator::from(Byte) as u8, 0b0100);
        assert_eq!(Mode::try_from(ModeIndicator::Alphanumeric), Ok(Alphanumeric));
        assert!(matches!(Mode::try_from(ModeIndicator::Eci), Err(QrError::NotSupported(_))));
        assert!(matches!(Mode::try_from(ModeIndicator::Fnc1First), Err(QrError::NotSupported(_))));
    }

    #[test]
    fn test_numeric_digit() {
        assert_eq!(Mode::numeric_digit(b'0'), 0);
        assert_eq!(Mode::numeric_digit(b'9'), 9);
    }

    #[test]
    fn test_alphanumeric_digit() {
        assert_eq!(Mode::alphanumeric_digit(b'0'), 0);
        assert_eq!(Mode::alphanumeric_digit(b'9'), 9);
        assert_eq!(Mode::alphanumeric_digit(b'A'), 10);
        assert_eq!(Mode::alphanumeric_digit(b'Z'), 35);
        assert_eq!(Mode::alphanumeric_digit(b' '), 36);
        assert_eq!(Mode::alphanumeric_digit(b'$'), 37);
        assert_eq!(Mode::alphanumeric_digit(b'/'), 43);
        assert_eq!(Mode::alphanumeric_digit(b':'), 44);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_digit() {
        Mode::alphanumeric_digit(b'a');
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk("012".as_bytes()), 0b0000001100);
        assert_eq!(Numeric.encode_chunk("345".as_bytes()), 0b0101011001);
        assert_eq!(Numeric.encode_chunk("901".as_bytes()), 0b1110000101);
        assert_eq!(Numeric.encode_chunk("67".as_bytes()), 0b1000011);
        assert_eq!(Numeric.encode_chunk("8".as_bytes()), 0b1000);
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk("AC".as_bytes()), 0b00111001110);
        assert_eq!(Alphanumeric.encode_chunk("-4".as_bytes()), 0b11100111001);
        assert_eq!(Alphanumeric.encode_chunk("2".as_bytes()), 0b000010);
    }

    #[test]
    fn test_kanji_encoding() {
        assert_eq!(Kanji.encode_chunk(&[0x93, 0x5F]), 0x0D9F);
        assert_eq!(Kanji.encode_chunk(&[0xE4, 0xAA]), 0x1AAA);
    }

    #[test]
    fn test_kanji_value_bounds() {
        assert_eq!(kanji_value(0x81, 0x40), Some(0));
        assert_eq!(kanji_value(0x9F, 0xFC), Some(0x1E * 0xC0 + 0xBC));
        assert_eq!(kanji_value(0xE0, 0x40), Some(0x1F * 0xC0));
        assert_eq!(kanji_value(0xEB, 0xBF), Some(0x2A * 0xC0 + 0x7F));
        assert_eq!(kanji_value(0x81, 0x3F), None);
        assert_eq!(kanji_value(0x81, 0x7F), None);
        assert_eq!(kanji_value(0xA0, 0x40), None);
        assert_eq!(kanji_value(0xEB, 0xC0), None);
        assert_eq!(kanji_value(0x41, 0x41), None);
    }

    #[test]
    fn test_contains() {
        assert!(Numeric.contains(b'0'));
        assert!(!Numeric.contains(b'A'));
        assert!(Alphanumeric.contains(b'Z'));
        assert!(Alphanumeric.contains(b' '));
        assert!(Alphanumeric.contains(b':'));
        assert!(!Alphanumeric.contains(b'@'));
        assert!(!Alphanumeric.contains(b'('));
        assert!(!Alphanumeric.contains(b'a'));
        assert!(!Alphanumeric.contains(0xFF));
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(3), 10);
        assert_eq!(Numeric.encoded_len(2), 7);
        assert_eq!(Numeric.encoded_len(1), 4);
        assert_eq!(Numeric.encoded_len(8), 27);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(1), 6);
        assert_eq!(Byte.encoded_len(1), 8);
        assert_eq!(Kanji.encoded_len(4), 26);
    }
}

// ECI designator
//------------------------------------------------------------------------------

/// Single byte Extended Channel Interpretation designator, 0 to 127.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct EciCode(u8);

impl EciCode {
    /// ISO/IEC 8859-1
    pub const LATIN1: Self = Self(3);
    pub const SHIFT_JIS: Self = Self(20);
    pub const UTF8: Self = Self(26);

    pub fn new(value: u8) -> QrResult<Self> {
        if value > 127 {
            return Err(QrError::OutOfRange("ECI designator must be within 0..=127"));
        }
        Ok(Self(value))
    }
}

impl Deref for EciCode {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for EciCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Segment
//------------------------------------------------------------------------------

/// One run of input encoded in a single mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSegment {
    pub mode: Mode,
    // Byte range into the source data
    pub range: Range<usize>,
    // Header, optional ECI and payload
    pub bit_len: usize,
    pub eci: Option<EciCode>,
}

impl DataSegment {
    pub fn new(version: Version, mode: Mode, range: Range<usize>, eci: Option<EciCode>) -> Self {
        let eci_bits = if eci.is_some() { ECI_HEADER_BITS } else { 0 };
        let header_bits = MODE_INDICATOR_BITS + version.char_cnt_bits(mode);
        let bit_len = eci_bits + header_bits + mode.encoded_len(range.len());
        Self { mode, range, bit_len, eci }
    }

    pub fn char_count(&self) -> usize {
        self.mode.char_count(self.range.len())
    }
}

// Encoding info
//------------------------------------------------------------------------------

/// Outcome of analysing the input: where it goes and how it is split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrEncodingInfo {
    pub version: Version,
    pub ec_level: ECLevel,
    pub segments: Vec<DataSegment>,
}

impl QrEncodingInfo {
    pub fn bit_len(&self) -> usize {
        self.segments.iter().map(|s| s.bit_len).sum()
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const ECI_HEADER_BITS: usize = 12;

pub const PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

const INVALID: u8 = 0xFF;

// Values for ' ' through 'Z'
#[rustfmt::skip]
static ALPHANUMERIC_VALUES: [u8; 59] = [
    36, INVALID, INVALID, INVALID, 37, 38, INVALID, INVALID, // ' '..'\''
    INVALID, INVALID, 39, 40, INVALID, 41, 42, 43, // '('..'/'
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, // '0'..'9'
    44, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, // ':'..'@'
    10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, // 'A'..'M'
    23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, // 'N'..'Z'
];
