use std::hash::{Hash, Hasher};

use num_traits::PrimInt;

use super::error::{QrError, QrResult};

// Bit buffer
//------------------------------------------------------------------------------

/// Growable, bit addressable buffer. Bit 0 is the most significant bit of the
/// first byte, matching the order in which QR codewords are read.
///
/// Only the first `len` bits are meaningful. Equality and hashing ignore
/// whatever sits in the backing words past that point.
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    words: Vec<u32>,
    // Bit length
    len: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer with room for `bit_capacity` bits before it has to grow.
    pub fn with_capacity(bit_capacity: usize) -> Self {
        Self { words: vec![0; bit_capacity.div_ceil(WORD_BITS)], len: 0 }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bb = Self::with_capacity(bytes.len() << 3);
        bb.extend_from_bytes(bytes);
        bb
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn byte_count(&self) -> usize {
        self.len.div_ceil(8)
    }

    fn reserve_bits(&mut self, bit_len: usize) {
        let needed = bit_len.div_ceil(WORD_BITS);
        if needed > self.words.len() {
            let grown = std::cmp::max(needed, self.words.len() * 2);
            self.words.resize(grown, 0);
        }
    }
}

// Bit access
//------------------------------------------------------------------------------

impl BitBuffer {
    pub fn get_bit(&self, index: usize) -> QrResult<bool> {
        if index >= self.len {
            return Err(QrError::OutOfRange("bit index"));
        }
        Ok(self.bit(index))
    }

    pub fn set_bit(&mut self, index: usize, bit: bool) -> QrResult<()> {
        if index >= self.len {
            return Err(QrError::OutOfRange("bit index"));
        }
        let mask = 1 << (WORD_BITS - 1 - (index % WORD_BITS));
        let word = &mut self.words[index / WORD_BITS];
        if bit {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        Ok(())
    }

    #[inline]
    fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Bit index out of bounds: Len {}, Index {index}", self.len);
        (self.words[index / WORD_BITS] >> (WORD_BITS - 1 - (index % WORD_BITS))) & 1 == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }
}

// Writes
//------------------------------------------------------------------------------

impl BitBuffer {
    /// Writes the low `bit_count` bits of `value` at absolute bit `position`,
    /// most significant bit first. The buffer grows to cover the written range.
    pub fn write_bits_big_endian<T>(&mut self, position: usize, value: T, bit_count: usize) -> QrResult<()>
    where
        T: PrimInt,
    {
        let value = value.to_u64().ok_or(QrError::OutOfRange("negative value"))?;
        if bit_count > 64 || (bit_count < 64 && value >> bit_count != 0) {
            return Err(QrError::OutOfRange("value does not fit in bit count"));
        }

        let end = position + bit_count;
        self.reserve_bits(end);

        let mut pos = position;
        let mut remaining = bit_count;
        while remaining > 0 {
            let offset = pos % WORD_BITS;
            let take = std::cmp::min(WORD_BITS - offset, remaining);
            let chunk_mask = (1u64 << take) - 1;
            let chunk = ((value >> (remaining - take)) & chunk_mask) as u32;
            let shift = WORD_BITS - offset - take;
            let mask = (chunk_mask as u32) << shift;

            let word = &mut self.words[pos / WORD_BITS];
            *word = (*word & !mask) | (chunk << shift);

            pos += take;
            remaining -= take;
        }

        self.len = std::cmp::max(self.len, end);
        Ok(())
    }

    /// Appends the low `bit_count` bits of `value`.
    pub fn push_bits<T>(&mut self, value: T, bit_count: usize) -> QrResult<()>
    where
        T: PrimInt,
    {
        self.write_bits_big_endian(self.len, value, bit_count)
    }

    pub fn push(&mut self, bit: bool) {
        self.reserve_bits(self.len + 1);
        self.len += 1;
        let index = self.len - 1;
        let mask = 1 << (WORD_BITS - 1 - (index % WORD_BITS));
        let word = &mut self.words[index / WORD_BITS];
        if bit {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    pub fn extend_from_bytes(&mut self, bytes: &[u8]) {
        self.reserve_bits(self.len + (bytes.len() << 3));
        for &b in bytes {
            // A byte always fits in 8 bits
            let _ = self.push_bits(b, 8);
        }
    }
}


// Reads
//------------------------------------------------------------------------------

impl BitBuffer {
    /// Reads `bit_count` bits starting at `position` as a big endian integer.
    pub fn read_bits(&self, position: usize, bit_count: usize) -> QrResult<u64> {
        if bit_count > 64 {
            return Err(QrError::OutOfRange("bit count"));
        }
        if position + bit_count > self.len {
            return Err(QrError::OutOfRange("bit range"));
        }
        Ok((position..position + bit_count).fold(0u64, |acc, i| (acc << 1) | self.bit(i) as u64))
    }

    /// Bytes of the buffer. The final partial byte, if any, is zero padded.
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self.words.iter().flat_map(|w| w.to_be_bytes()).collect();
        bytes.resize(self.byte_count(), 0);
        let tail = self.len & 7;
        if tail > 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFF << (8 - tail);
            }
        }
        bytes
    }
}


// Equality over the logical bits only
//------------------------------------------------------------------------------

impl BitBuffer {
    // Full words, then the masked trailing word
    fn logical_words(&self) -> impl Iterator<Item = u32> + '_ {
        let full = self.len / WORD_BITS;
        let tail = self.len % WORD_BITS;
        let last = (tail > 0).then(|| self.words[full] & (u32::MAX << (WORD_BITS - tail)));
        self.words[..full].iter().copied().chain(last)
    }
}

impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.logical_words().eq(other.logical_words())
    }
}

impl Eq for BitBuffer {}

impl Hash for BitBuffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.logical_words().for_each(|w| w.hash(state));
    }
}


// Global constants
//------------------------------------------------------------------------------

const WORD_BITS: usize = u32::BITS as usize;
