use std::fmt::{Display, Formatter};
use std::ops::Deref;

use super::codec::{Mode, ModeIndicator};
use super::error::{QrError, QrResult};
use super::version_db::{ALIGNMENT_PATTERN_POSITIONS, EC_BLOCKS, TOTAL_CODEWORDS};

// Version
//------------------------------------------------------------------------------

/// QR code model 2 version, 1 to 40.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct Version(u8);

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Version {
    type Error = QrError;

    fn try_from(value: u8) -> QrResult<Self> {
        Self::new(value)
    }
}

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    pub fn new(version: u8) -> QrResult<Self> {
        if !(1..=40).contains(&version) {
            return Err(QrError::OutOfRange("version must be within 1..=40"));
        }
        Ok(Self(version))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=40).map(Self)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Modules per side.
    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.index()]
    }

    pub fn ec_blocks(self, ecl: ECLevel) -> &'static ErrorCorrectionBlocks {
        &EC_BLOCKS[self.index()][ecl as usize]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.ec_blocks(ecl).total_data_codewords()
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    /// Bits left over once every codeword is placed. They are always light
    /// before masking.
    pub fn remainder_bits(self) -> usize {
        self.raw_modules() - (self.total_codewords() << 3)
    }

    /// Number of modules available for data and error correction codewords.
    pub fn raw_modules(self) -> usize {
        let v = self.0 as usize;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align = v / 7 + 2;
            res -= (25 * align - 10) * align - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    /// Centre coordinates of the alignment patterns along either axis.
    pub fn alignment_pattern(self) -> &'static [usize] {
        ALIGNMENT_PATTERN_POSITIONS[self.index()]
    }

    /// 18 bit version information word, six version bits followed by a twelve
    /// bit BCH remainder. Only placed for versions 7 and above.
    pub fn version_info(self) -> u32 {
        let data = self.0 as u32;
        (data << 12) | bch_remainder(data, VERSION_INFO_GENERATOR, 12)
    }

    /// Width of the character count indicator for a payload mode.
    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let band = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
            Mode::Kanji => [8, 10, 12][band],
        }
    }

    /// Characters of `mode` that fit in a single segment, ignoring any ECI
    /// header. Leftover bits that cannot hold a whole character group are not
    /// counted.
    pub fn capacity_in_characters(self, mode: Mode, ecl: ECLevel) -> usize {
        let header = MODE_INDICATOR_BITS + self.char_cnt_bits(mode);
        let bits = self.data_bit_capacity(ecl).saturating_sub(header);
        match mode {
            Mode::Numeric => bits * 3 / 10,
            Mode::Alphanumeric => bits * 2 / 11,
            Mode::Byte => bits / 8,
            Mode::Kanji => bits / 13,
        }
    }

    /// Smallest version whose capacity covers `char_count` characters.
    pub fn for_capacity(char_count: usize, mode: Mode, ecl: ECLevel) -> Option<Self> {
        let versions: Vec<Self> = Self::all().collect();
        let idx = versions.partition_point(|v| v.capacity_in_characters(mode, ecl) < char_count);
        versions.get(idx).copied()
    }
}

/// Width of the character count indicator. Fails for modes which carry no
/// character count.
pub fn character_count_indicator_bits(version: Version, mode: ModeIndicator) -> QrResult<usize> {
    let mode = Mode::try_from(mode)?;
    Ok(version.char_cnt_bits(mode))
}


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub enum ECLevel {
    L = 0,
    #[default]
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub const ALL: [Self; 4] = [Self::L, Self::M, Self::Q, Self::H];

    /// Two bit code used in the format information.
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl TryFrom<u8> for ECLevel {
    type Error = QrError;

    fn try_from(value: u8) -> QrResult<Self> {
        match value {
            0 => Ok(Self::L),
            1 => Ok(Self::M),
            2 => Ok(Self::Q),
            3 => Ok(Self::H),
            _ => Err(QrError::OutOfRange("error correction level must be within 0..=3")),
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        };
        f.write_str(s)
    }
}

/// 15 bit format information word for a level and mask, BCH protected and
/// XORed with the fixed format mask.
pub fn format_info(ecl: ECLevel, mask: u8) -> u32 {
    debug_assert!(mask < 8, "Invalid mask pattern: {mask}");
    let data = (ecl.format_bits() << 3) | mask as u32;
    ((data << 10) | bch_remainder(data, FORMAT_INFO_GENERATOR, 10)) ^ FORMAT_INFO_MASK
}

fn bch_remainder(data: u32, generator: u32, degree: u32) -> u32 {
    let mut rem = data << degree;
    let gen_len = 32 - generator.leading_zeros();
    while rem != 0 && 32 - rem.leading_zeros() >= gen_len {
        let shift = 32 - rem.leading_zeros() - gen_len;
        rem ^= generator << shift;
    }
    rem
}


// Error correction block layout
//------------------------------------------------------------------------------

/// `count` blocks which each carry `data_codewords` data codewords.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGroup {
    pub count: usize,
    pub data_codewords: usize,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ErrorCorrectionBlocks {
    pub ec_codewords_per_block: usize,
    pub groups: &'static [BlockGroup],
}

impl ErrorCorrectionBlocks {
    pub fn total_data_codewords(&self) -> usize {
        self.groups.iter().map(|g| g.count * g.data_codewords).sum()
    }

    pub fn block_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Data codewords of every block in order, shorter blocks first.
    pub fn data_block_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().flat_map(|g| std::iter::repeat(g.data_codewords).take(g.count))
    }
}

#[cfg(test)]
mod block_tests {
    use super::*;

    #[test]
    fn test_block_layouts() {
        let v5q = Version::new(5).unwrap().ec_blocks(ECLevel::Q);
        assert_eq!(v5q.ec_codewords_per_block, 18);
        assert_eq!(v5q.data_block_lengths().collect::<Vec<_>>(), vec![15, 15, 16, 16]);

        let v7h = Version::new(7).unwrap().ec_blocks(ECLevel::H);
        assert_eq!(v7h.ec_codewords_per_block, 26);
        assert_eq!(v7h.block_count(), 5);
        assert_eq!(v7h.total_data_codewords(), 66);

        let v40h = Version::MAX.ec_blocks(ECLevel::H);
        assert_eq!(v40h.ec_codewords_per_block, 30);
        assert_eq!(v40h.groups, &[BlockGroup { count: 20, data_codewords: 15 }, BlockGroup { count: 61, data_codewords: 16 }]);
    }

    #[test]
    fn test_groups_are_sorted() {
        for v in Version::all() {
            for ecl in ECLevel::ALL {
                let lens: Vec<usize> = v.ec_blocks(ecl).data_block_lengths().collect();
                assert!(lens.windows(2).all(|w| w[0] <= w[1]));
                assert!(lens.last().unwrap() - lens.first().unwrap() <= 1);
            }
        }
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const MODE_INDICATOR_BITS: usize = 4;

const FORMAT_INFO_GENERATOR: u32 = 0b101_0011_0111;

const FORMAT_INFO_MASK: u32 = 0b101_0100_0001_0010;

const VERSION_INFO_GENERATOR: u32 = 0b1_1111_0010_0101;
