pub use encode::*;
pub use writer::{push_alphanumeric_data, push_byte_data, push_kanji_data, push_numeric_data, write_header};

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use std::borrow::Cow;

    use encoding_rs::SHIFT_JIS;
    use log::trace;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bit_buffer::BitBuffer;
    use crate::common::codec::{kanji_value, DataSegment, EciCode, Mode, QrEncodingInfo};
    use crate::common::error::{QrError, QrResult};
    use crate::common::metadata::{ECLevel, Version};

    /// Picks the densest single mode for text and returns the bytes to encode
    /// in that mode. Kanji mode works on the Shift-JIS form of the text, every
    /// other mode on its UTF-8 bytes.
    pub fn encode_text(text: &str) -> (Cow<'_, [u8]>, Mode) {
        let bytes = text.as_bytes();
        if bytes.iter().all(|&b| Mode::Numeric.contains(b)) {
            return (Cow::Borrowed(bytes), Mode::Numeric);
        }
        if bytes.iter().all(|&b| Mode::Alphanumeric.contains(b)) {
            return (Cow::Borrowed(bytes), Mode::Alphanumeric);
        }
        let (sjis, _, had_errors) = SHIFT_JIS.encode(text);
        if !had_errors && !contains_any_except_kanji(&sjis) {
            return (sjis, Mode::Kanji);
        }
        (Cow::Borrowed(bytes), Mode::Byte)
    }

    /// Mode for raw bytes, treating any run of valid Shift-JIS pairs as kanji.
    pub fn derive_mode(data: &[u8]) -> Mode {
        if data.iter().all(|&b| Mode::Numeric.contains(b)) {
            Mode::Numeric
        } else if data.iter().all(|&b| Mode::Alphanumeric.contains(b)) {
            Mode::Alphanumeric
        } else if !contains_any_except_kanji(data) {
            Mode::Kanji
        } else {
            Mode::Byte
        }
    }

    /// True if `data` is not a sequence of kanji mode Shift-JIS pairs. Odd
    /// lengths always count as containing a stray byte.
    pub fn contains_any_except_kanji(data: &[u8]) -> bool {
        data.len() % 2 != 0 || data.chunks_exact(2).any(|p| kanji_value(p[0], p[1]).is_none())
    }

    fn validate(data: &[u8], mode: Mode) -> QrResult<()> {
        let valid = match mode {
            Mode::Numeric | Mode::Alphanumeric => data.iter().all(|&b| mode.contains(b)),
            Mode::Byte => true,
            Mode::Kanji => !contains_any_except_kanji(data),
        };
        if !valid {
            return Err(QrError::InvalidArgument("data contains characters outside of the mode"));
        }
        Ok(())
    }

    /// Lays `data` out as a single segment and settles the version. With no
    /// version given, the smallest one that fits is chosen.
    pub fn analyze(
        data: &[u8],
        mode: Mode,
        ecl: ECLevel,
        version: Option<Version>,
        eci: Option<EciCode>,
    ) -> QrResult<QrEncodingInfo> {
        if eci.is_some() && mode != Mode::Byte {
            return Err(QrError::InvalidArgument("ECI is only supported in byte mode"));
        }
        validate(data, mode)?;

        let version = match version {
            Some(v) => v,
            None => {
                // A single byte ECI header costs as much as one byte mode character
                let char_count = mode.char_count(data.len()) + eci.is_some() as usize;
                Version::for_capacity(char_count, mode, ecl).ok_or(QrError::DataTooLarge)?
            }
        };

        let segment = DataSegment::new(version, mode, 0..data.len(), eci);
        if segment.bit_len > version.data_bit_capacity(ecl) {
            return Err(QrError::DataTooLarge);
        }
        trace!("Analysed {} bytes as {mode}: {} bits at version {version}", data.len(), segment.bit_len);

        Ok(QrEncodingInfo { version, ec_level: ecl, segments: vec![segment] })
    }

    /// Packs every segment, then terminates and pads the stream to exactly the
    /// data codeword capacity of the version.
    pub fn encode_data_bits(info: &QrEncodingInfo, data: &[u8]) -> QrResult<BitBuffer> {
        let bit_capacity = info.version.data_bit_capacity(info.ec_level);
        let mut out = BitBuffer::with_capacity(bit_capacity);
        for seg in &info.segments {
            let seg_data = data
                .get(seg.range.clone())
                .ok_or(QrError::InvalidArgument("segment range outside of data"))?;
            push_segment(seg, seg_data, info.version, &mut out)?;
        }
        if out.len() > bit_capacity {
            return Err(QrError::DataTooLarge);
        }

        push_terminator(&mut out, bit_capacity)?;
        pad_remaining_capacity(&mut out, bit_capacity)?;

        assert_eq!(
            out.len(),
            bit_capacity,
            "Encoded data does not fill the data codewords: Version {}, Level {}",
            info.version,
            info.ec_level
        );
        Ok(out)
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub mod writer {
    use crate::common::bit_buffer::BitBuffer;
    use crate::common::codec::{kanji_value, DataSegment, EciCode, Mode, ModeIndicator, PADDING_CODEWORDS};
    use crate::common::error::{QrError, QrResult};
    use crate::common::metadata::{character_count_indicator_bits, Version, MODE_INDICATOR_BITS};

    pub(super) fn push_segment(seg: &DataSegment, data: &[u8], version: Version, out: &mut BitBuffer) -> QrResult<()> {
        write_header(out, version, seg.mode.into(), seg.char_count(), seg.eci)?;
        match seg.mode {
            Mode::Numeric => push_numeric_data(data, out),
            Mode::Alphanumeric => push_alphanumeric_data(data, out),
            Mode::Byte => push_byte_data(data, out),
            Mode::Kanji => push_kanji_data(data, out),
        }
    }

    /// Optional ECI header, then the mode indicator and character count.
    pub fn write_header(
        out: &mut BitBuffer,
        version: Version,
        mode: ModeIndicator,
        char_count: usize,
        eci: Option<EciCode>,
    ) -> QrResult<()> {
        let len_bits = character_count_indicator_bits(version, mode)?;
        if let Some(eci) = eci {
            if mode != ModeIndicator::Byte {
                return Err(QrError::InvalidArgument("ECI is only supported in byte mode"));
            }
            out.push_bits(ModeIndicator::Eci as u8, MODE_INDICATOR_BITS)?;
            out.push_bits(*eci, 8)?;
        }
        out.push_bits(mode as u8, MODE_INDICATOR_BITS)?;
        out.push_bits(char_count, len_bits)
    }

    pub fn push_numeric_data(data: &[u8], out: &mut BitBuffer) -> QrResult<()> {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            out.push_bits(Mode::Numeric.encode_chunk(chunk), len)?;
        }
        Ok(())
    }

    pub fn push_alphanumeric_data(data: &[u8], out: &mut BitBuffer) -> QrResult<()> {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            out.push_bits(Mode::Alphanumeric.encode_chunk(chunk), len)?;
        }
        Ok(())
    }

    pub fn push_byte_data(data: &[u8], out: &mut BitBuffer) -> QrResult<()> {
        out.extend_from_bytes(data);
        Ok(())
    }

    pub fn push_kanji_data(data: &[u8], out: &mut BitBuffer) -> QrResult<()> {
        if data.len() % 2 != 0 {
            return Err(QrError::InvalidArgument("kanji data must be Shift-JIS byte pairs"));
        }
        for pair in data.chunks_exact(2) {
            let value = kanji_value(pair[0], pair[1])
                .ok_or(QrError::InvalidArgument("byte pair is not a kanji mode character"))?;
            out.push_bits(value, 13)?;
        }
        Ok(())
    }

    pub(super) fn push_terminator(out: &mut BitBuffer, bit_capacity: usize) -> QrResult<()> {
        let bit_len = out.len();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len)?;
        }
        Ok(())
    }

    pub(super) fn pad_remaining_capacity(out: &mut BitBuffer, bit_capacity: usize) -> QrResult<()> {
        push_padding_bits(out)?;
        push_padding_codewords(out, bit_capacity)
    }

    fn push_padding_bits(out: &mut BitBuffer) -> QrResult<()> {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0u8, 8 - offset)?;
        }
        Ok(())
    }

    fn push_padding_codewords(out: &mut BitBuffer, bit_capacity: usize) -> QrResult<()> {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let mut remaining = (bit_capacity.saturating_sub(out.len())) >> 3;
        while remaining >= 4 {
            out.push_bits(PADDING_PATTERN, 32)?;
            remaining -= 4;
        }
        for &pc in PADDING_CODEWORDS.iter().cycle().take(remaining) {
            out.push_bits(pc, 8)?;
        }
        Ok(())
    }

    const PADDING_PATTERN: u32 = 0xEC11_EC11;

    #[cfg(test)]
    mod writer_tests {
        use super::{
            push_alphanumeric_data, push_byte_data, push_kanji_data, push_numeric_data, push_padding_bits,
            push_padding_codewords, push_terminator, write_header,
        };
        use crate::common::bit_buffer::BitBuffer;
        use crate::common::codec::{EciCode, ModeIndicator, PADDING_CODEWORDS};
        use crate::common::error::QrError;
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_write_header_v1() {
            let ver = Version::MIN;
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111100],
                vec![0b00101111, 0b11111000],
                vec![0b01001111, 0b11110000],
                vec![0b10001111, 0b11110000],
            ];
            let modes = [ModeIndicator::Numeric, ModeIndicator::Alphanumeric, ModeIndicator::Byte, ModeIndicator::Kanji];
            let counts = [1023, 511, 255, 255];
            for ((mode, count), exp_vec) in modes.iter().zip(counts).zip(exp_vecs.iter()) {
                let mut bb = BitBuffer::new();
                write_header(&mut bb, ver, *mode, count, None).unwrap();
                assert_eq!(&bb.as_bytes(), exp_vec);
            }
        }

        #[test]
        fn test_write_header_v10() {
            let ver = Version::new(10).unwrap();
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111],
                vec![0b00101111, 0b11111110],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let modes = [ModeIndicator::Numeric, ModeIndicator::Alphanumeric, ModeIndicator::Byte];
            let counts = [4095, 2047, 65535];
            for ((mode, count), exp_vec) in modes.iter().zip(counts).zip(exp_vecs.iter()) {
                let mut bb = BitBuffer::new();
                write_header(&mut bb, ver, *mode, count, None).unwrap();
                assert_eq!(&bb.as_bytes(), exp_vec);
            }
        }

        #[test]
        fn test_write_header_v27() {
            let ver = Version::new(27).unwrap();
            let exp_vecs: Vec<Vec<u8>> = vec![
                vec![0b00011111, 0b11111111, 0b11000000],
                vec![0b00101111, 0b11111111, 0b10000000],
                vec![0b01001111, 0b11111111, 0b11110000],
            ];
            let modes = [ModeIndicator::Numeric, ModeIndicator::Alphanumeric, ModeIndicator::Byte];
            let counts = [16383, 8191, 65535];
            for ((mode, count), exp_vec) in modes.iter().zip(counts).zip(exp_vecs.iter()) {
                let mut bb = BitBuffer::new();
                write_header(&mut bb, ver, *mode, count, None).unwrap();
                assert_eq!(&bb.as_bytes(), exp_vec);
            }
        }

        #[test]
        fn test_write_header_errors() {
            let ver = Version::MIN;
            let mut bb = BitBuffer::new();
            let res = write_header(&mut bb, ver, ModeIndicator::StructuredAppend, 1, None);
            assert!(matches!(res, Err(QrError::NotSupported(_))));
            let res = write_header(&mut bb, ver, ModeIndicator::Terminator, 1, None);
            assert!(matches!(res, Err(QrError::NotSupported(_))));
            let res = write_header(&mut bb, ver, ModeIndicator::Numeric, 1, Some(EciCode::UTF8));
            assert!(matches!(res, Err(QrError::InvalidArgument(_))));
            let res = write_header(&mut bb, ver, ModeIndicator::Numeric, 1024, None);
            assert!(matches!(res, Err(QrError::OutOfRange(_))));
        }

        #[test]
        fn test_write_header_with_eci() {
            let mut bb = BitBuffer::new();
            write_header(&mut bb, Version::MIN, ModeIndicator::Byte, 3, Some(EciCode::LATIN1)).unwrap();
            assert_eq!(bb.len(), 24);
            assert_eq!(bb.as_bytes(), vec![0b0111_0000, 0b0011_0100, 0b0000_0011]);
        }

        #[test]
        fn test_push_numeric_data() {
            let mut bb = BitBuffer::new();
            push_numeric_data("01234567".as_bytes(), &mut bb).unwrap();
            assert_eq!(bb.as_bytes(), vec![0b00000011, 0b00010101, 0b10011000, 0b01100000]);
            let mut bb = BitBuffer::new();
            push_numeric_data("8".as_bytes(), &mut bb).unwrap();
            assert_eq!(bb.as_bytes(), vec![0b10000000]);
        }

        #[test]
        fn test_push_alphanumeric_data() {
            let mut bb = BitBuffer::new();
            push_alphanumeric_data("AC-42".as_bytes(), &mut bb).unwrap();
            assert_eq!(bb.as_bytes(), vec![0b00111001, 0b11011100, 0b11100100, 0b00100000])
        }

        #[test]
        fn test_push_byte_data() {
            let mut bb = BitBuffer::new();
            push_byte_data("a".as_bytes(), &mut bb).unwrap();
            assert_eq!(bb.as_bytes(), vec![0b01100001])
        }

        #[test]
        fn test_push_kanji_data() {
            let mut bb = BitBuffer::new();
            push_kanji_data(&[0x93, 0x5F, 0xE4, 0xAA], &mut bb).unwrap();
            assert_eq!(bb.len(), 26);
            assert_eq!(bb.read_bits(0, 13).unwrap(), 0b0_1101_1001_1111);
            assert_eq!(bb.read_bits(13, 13).unwrap(), 0b1_1010_1010_1010);
            assert!(push_kanji_data(&[0x93], &mut bb).is_err());
            assert!(push_kanji_data(&[0x41, 0x41], &mut bb).is_err());
        }

        #[test]
        fn test_push_terminator() {
            let bit_capacity = Version::MIN.data_bit_capacity(ECLevel::L);
            let capacity = bit_capacity >> 3;
            let mut bb = BitBuffer::with_capacity(bit_capacity);
            bb.push_bits(0b1u8, 1).unwrap();
            push_terminator(&mut bb, bit_capacity).unwrap();
            assert_eq!(bb.as_bytes(), vec![0b10000000]);
            assert_eq!(bb.len() & 7, 5);
            push_padding_bits(&mut bb).unwrap();
            for _ in 0..capacity - 1 {
                bb.push_bits(0b11111111u8, 8).unwrap();
            }
            push_terminator(&mut bb, bit_capacity).unwrap();
            assert_eq!(bb.len(), bit_capacity);
        }

        #[test]
        fn test_push_terminator_partial() {
            let mut bb = BitBuffer::new();
            bb.push_bits(0u8, 6).unwrap();
            push_terminator(&mut bb, 8).unwrap();
            assert_eq!(bb.len(), 8);
        }

        #[test]
        fn test_push_padding_bits() {
            let mut bb = BitBuffer::new();
            bb.push_bits(0b1u8, 1).unwrap();
            push_padding_bits(&mut bb).unwrap();
            assert_eq!(bb.as_bytes(), vec![0b10000000]);
            assert_eq!(bb.len() & 7, 0);
        }

        #[test]
        fn test_push_padding_codewords() {
            let bit_capacity = Version::MIN.data_bit_capacity(ECLevel::L);
            let mut bb = BitBuffer::with_capacity(bit_capacity);
            bb.push_bits(0b1u8, 1).unwrap();
            push_padding_bits(&mut bb).unwrap();
            push_padding_codewords(&mut bb, bit_capacity).unwrap();
            let mut output = vec![0b10000000];
            output.extend(PADDING_CODEWORDS.iter().cycle().take(18));
            assert_eq!(bb.as_bytes(), output);
        }
    }
}
