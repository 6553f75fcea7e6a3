use crate::common::bit_buffer::BitBuffer;
use crate::common::error::{QrError, QrResult};
use crate::common::galois::{generator_polynomial, poly_rem};
use crate::common::metadata::{ECLevel, Version};

// Error correction codewords
//------------------------------------------------------------------------------

/// Splits the data codewords into blocks, computes their Reed-Solomon
/// codewords and interleaves both into the final codeword sequence.
pub fn encode_and_interleave(version: Version, ec_level: ECLevel, data: &BitBuffer) -> QrResult<BitBuffer> {
    let data = data.as_bytes();
    if data.len() != version.data_codewords(ec_level) {
        return Err(QrError::InvalidArgument("data length does not match the data codeword capacity"));
    }

    let (data_blocks, ecc_blocks) = ecc(&data, version, ec_level)?;

    let mut res = BitBuffer::with_capacity(version.total_codewords() << 3);
    res.extend_from_bytes(&interleave(&data_blocks));
    res.extend_from_bytes(&interleave(&ecc_blocks));
    debug_assert!(
        res.byte_count() == version.total_codewords(),
        "Codeword count mismatch: Expected {}, Found {}",
        version.total_codewords(),
        res.byte_count()
    );
    Ok(res)
}

pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> QrResult<(Vec<&[u8]>, Vec<Vec<u8>>)> {
    let data_blocks = blockify(data, version, ec_level);
    let ecc_size_per_block = version.ec_blocks(ec_level).ec_codewords_per_block;
    let ecc_blocks =
        data_blocks.iter().map(|b| ecc_per_block(b, ecc_size_per_block)).collect::<QrResult<Vec<_>>>()?;
    Ok((data_blocks, ecc_blocks))
}

/// Data codewords cut into blocks following the version's block groups.
pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let blocks = version.ec_blocks(ec_level);
    debug_assert!(
        blocks.total_data_codewords() == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        blocks.total_data_codewords()
    );

    let mut data_blocks = Vec::with_capacity(blocks.block_count());
    let mut rest = data;
    for len in blocks.data_block_lengths() {
        let (block, tail) = rest.split_at(len);
        data_blocks.push(block);
        rest = tail;
    }
    data_blocks
}

// Remainder of the block polynomial divided by the generator polynomial
fn ecc_per_block(block: &[u8], ecc_count: usize) -> QrResult<Vec<u8>> {
    let gen_poly =
        generator_polynomial(ecc_count).ok_or(QrError::NotSupported("error correction codeword count"))?;
    poly_rem(block, gen_poly)
}

/// Takes the first codeword of every block, then the second and so on.
/// Exhausted blocks are skipped.
pub fn interleave<T: AsRef<[u8]>>(blocks: &[T]) -> Vec<u8> {
    let max_len = blocks.iter().map(|b| b.as_ref().len()).max().unwrap_or(0);
    let total = blocks.iter().map(|b| b.as_ref().len()).sum();
    let mut res = Vec::with_capacity(total);
    for i in 0..max_len {
        res.extend(blocks.iter().filter_map(|b| b.as_ref().get(i)));
    }
    res
}

#[cfg(test)]
mod ec_tests {
    use super::{blockify, ecc, ecc_per_block, encode_and_interleave, interleave};
    use crate::common::bit_buffer::BitBuffer;
    use crate::common::error::QrError;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_poly_mod_1() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10).unwrap();
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13).unwrap();
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18).unwrap();
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_unsupported_ecc_count() {
        assert!(matches!(ecc_per_block(b"abc", 11), Err(QrError::NotSupported(_))));
    }

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (blocks, ecc) = ecc(msg, Version::MIN, ECLevel::M).unwrap();
        assert_eq!(blocks, vec![&msg[..]]);
        assert_eq!(&*ecc, expected_ecc);
    }

    const MSG_5Q: &[u8; 62] = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";

    #[test]
    fn test_add_ec_complex() {
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let version = Version::new(5).unwrap();
        let (_, ecc) = ecc(MSG_5Q, version, ECLevel::Q).unwrap();
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_blockify_uneven_groups() {
        let version = Version::new(5).unwrap();
        let blocks = blockify(MSG_5Q, version, ECLevel::Q);
        let lens: Vec<usize> = blocks.iter().map(|b| b.len()).collect();
        assert_eq!(lens, vec![15, 15, 16, 16]);
        assert_eq!(blocks[2][0], MSG_5Q[30]);
    }

    #[test]
    fn test_interleave() {
        let blocks: [&[u8]; 3] = [&[1, 2], &[3, 4, 5], &[6, 7, 8]];
        assert_eq!(interleave(&blocks), vec![1, 3, 6, 2, 4, 7, 5, 8]);
        assert!(interleave::<&[u8]>(&[]).is_empty());
    }

    #[test]
    fn test_encode_and_interleave_1h() {
        let data = BitBuffer::from_bytes(&[32, 65, 205, 69, 41, 220, 46, 128, 236]);
        let res = encode_and_interleave(Version::MIN, ECLevel::H, &data).unwrap();
        let exp = vec![
            32, 65, 205, 69, 41, 220, 46, 128, 236, 42, 159, 74, 221, 244, 169, 239, 150, 138, 70, 237, 85, 224,
            96, 74, 219, 61,
        ];
        assert_eq!(res.as_bytes(), exp);
    }

    #[test]
    fn test_encode_and_interleave_5q() {
        let version = Version::new(5).unwrap();
        let data = BitBuffer::from_bytes(MSG_5Q);
        let res = encode_and_interleave(version, ECLevel::Q, &data).unwrap().as_bytes();
        assert_eq!(res.len(), version.total_codewords());
        // Heads of the four data blocks, then the tail of the longer blocks
        assert_eq!(&res[..4], &[MSG_5Q[0], MSG_5Q[15], MSG_5Q[30], MSG_5Q[46]]);
        assert_eq!(&res[60..62], &[MSG_5Q[45], MSG_5Q[61]]);
        // Error correction codewords start right after the data
        assert_eq!(&res[62..66], &[0xd5, 0x57, 0x94, 0xeb]);
        assert_eq!(res[133], 0xec);
    }

    #[test]
    fn test_length_mismatch() {
        let data = BitBuffer::from_bytes(&[0; 10]);
        let res = encode_and_interleave(Version::MIN, ECLevel::H, &data);
        assert!(matches!(res, Err(QrError::InvalidArgument(_))));
    }
}
