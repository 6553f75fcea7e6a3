// Per-version tables for ISO/IEC 18004 model 2 symbols.
//
// Rows are indexed by `version - 1`; the inner error correction arrays are ordered L, M, Q, H.

use super::metadata::{BlockGroup, ErrorCorrectionBlocks};

macro_rules! blocks {
    ($ec:expr; $(($count:expr, $data:expr)),+) => {
        ErrorCorrectionBlocks {
            ec_codewords_per_block: $ec,
            groups: &[$(BlockGroup { count: $count, data_codewords: $data }),+],
        }
    };
}

// Total codewords (data + error correction) per version
#[rustfmt::skip]
pub(crate) static TOTAL_CODEWORDS: [usize; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346,
    404, 466, 532, 581, 655, 733, 815, 901, 991, 1085,
    1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185,
    2323, 2465, 2611, 2761, 2876, 3034, 3196, 3362, 3532, 3706,
];

// Error correction block layout per version, ordered L, M, Q, H
#[rustfmt::skip]
pub(crate) static EC_BLOCKS: [[ErrorCorrectionBlocks; 4]; 40] = [
    // Version 1
    [
        blocks!(7; (1, 19)),
        blocks!(10; (1, 16)),
        blocks!(13; (1, 13)),
        blocks!(17; (1, 9)),
    ],
    // Version 2
    [
        blocks!(10; (1, 34)),
        blocks!(16; (1, 28)),
        blocks!(22; (1, 22)),
        blocks!(28; (1, 16)),
    ],
    // Version 3
    [
        blocks!(15; (1, 55)),
        blocks!(26; (1, 44)),
        blocks!(18; (2, 17)),
        blocks!(22; (2, 13)),
    ],
    // Version 4
    [
        blocks!(20; (1, 80)),
        blocks!(18; (2, 32)),
        blocks!(26; (2, 24)),
        blocks!(16; (4, 9)),
    ],
    // Version 5
    [
        blocks!(26; (1, 108)),
        blocks!(24; (2, 43)),
        blocks!(18; (2, 15), (2, 16)),
        blocks!(22; (2, 11), (2, 12)),
    ],
    // Version 6
    [
        blocks!(18; (2, 68)),
        blocks!(16; (4, 27)),
        blocks!(24; (4, 19)),
        blocks!(28; (4, 15)),
    ],
    // Version 7
    [
        blocks!(20; (2, 78)),
        blocks!(18; (4, 31)),
        blocks!(18; (2, 14), (4, 15)),
        blocks!(26; (4, 13), (1, 14)),
    ],
    // Version 8
    [
        blocks!(24; (2, 97)),
        blocks!(22; (2, 38), (2, 39)),
        blocks!(22; (4, 18), (2, 19)),
        blocks!(26; (4, 14), (2, 15)),
    ],
    // Version 9
    [
        blocks!(30; (2, 116)),
        blocks!(22; (3, 36), (2, 37)),
        blocks!(20; (4, 16), (4, 17)),
        blocks!(24; (4, 12), (4, 13)),
    ],
    // Version 10
    [
        blocks!(18; (2, 68), (2, 69)),
        blocks!(26; (4, 43), (1, 44)),
        blocks!(24; (6, 19), (2, 20)),
        blocks!(28; (6, 15), (2, 16)),
    ],
    // Version 11
    [
        blocks!(20; (4, 81)),
        blocks!(30; (1, 50), (4, 51)),
        blocks!(28; (4, 22), (4, 23)),
        blocks!(24; (3, 12), (8, 13)),
    ],
    // Version 12
    [
        blocks!(24; (2, 92), (2, 93)),
        blocks!(22; (6, 36), (2, 37)),
        blocks!(26; (4, 20), (6, 21)),
        blocks!(28; (7, 14), (4, 15)),
    ],
    // Version 13
    [
        blocks!(26; (4, 107)),
        blocks!(22; (8, 37), (1, 38)),
        blocks!(24; (8, 20), (4, 21)),
        blocks!(22; (12, 11), (4, 12)),
    ],
    // Version 14
    [
        blocks!(30; (3, 115), (1, 116)),
        blocks!(24; (4, 40), (5, 41)),
        blocks!(20; (11, 16), (5, 17)),
        blocks!(24; (11, 12), (5, 13)),
    ],
    // Version 15
    [
        blocks!(22; (5, 87), (1, 88)),
        blocks!(24; (5, 41), (5, 42)),
        blocks!(30; (5, 24), (7, 25)),
        blocks!(24; (11, 12), (7, 13)),
    ],
    // Version 16
    [
        blocks!(24; (5, 98), (1, 99)),
        blocks!(28; (7, 45), (3, 46)),
        blocks!(24; (15, 19), (2, 20)),
        blocks!(30; (3, 15), (13, 16)),
    ],
    // Version 17
    [
        blocks!(28; (1, 107), (5, 108)),
        blocks!(28; (10, 46), (1, 47)),
        blocks!(28; (1, 22), (15, 23)),
        blocks!(28; (2, 14), (17, 15)),
    ],
    // Version 18
    [
        blocks!(30; (5, 120), (1, 121)),
        blocks!(26; (9, 43), (4, 44)),
        blocks!(28; (17, 22), (1, 23)),
        blocks!(28; (2, 14), (19, 15)),
    ],
    // Version 19
    [
        blocks!(28; (3, 113), (4, 114)),
        blocks!(26; (3, 44), (11, 45)),
        blocks!(26; (17, 21), (4, 22)),
        blocks!(26; (9, 13), (16, 14)),
    ],
    // Version 20
    [
        blocks!(28; (3, 107), (5, 108)),
        blocks!(26; (3, 41), (13, 42)),
        blocks!(30; (15, 24), (5, 25)),
        blocks!(28; (15, 15), (10, 16)),
    ],
    // Version 21
    [
        blocks!(28; (4, 116), (4, 117)),
        blocks!(26; (17, 42)),
        blocks!(28; (17, 22), (6, 23)),
        blocks!(30; (19, 16), (6, 17)),
    ],
    // Version 22
    [
        blocks!(28; (2, 111), (7, 112)),
        blocks!(28; (17, 46)),
        blocks!(30; (7, 24), (16, 25)),
        blocks!(24; (34, 13)),
    ],
    // Version 23
    [
        blocks!(30; (4, 121), (5, 122)),
        blocks!(28; (4, 47), (14, 48)),
        blocks!(30; (11, 24), (14, 25)),
        blocks!(30; (16, 15), (14, 16)),
    ],
    // Version 24
    [
        blocks!(30; (6, 117), (4, 118)),
        blocks!(28; (6, 45), (14, 46)),
        blocks!(30; (11, 24), (16, 25)),
        blocks!(30; (30, 16), (2, 17)),
    ],
    // Version 25
    [
        blocks!(26; (8, 106), (4, 107)),
        blocks!(28; (8, 47), (13, 48)),
        blocks!(30; (7, 24), (22, 25)),
        blocks!(30; (22, 15), (13, 16)),
    ],
    // Version 26
    [
        blocks!(28; (10, 114), (2, 115)),
        blocks!(28; (19, 46), (4, 47)),
        blocks!(28; (28, 22), (6, 23)),
        blocks!(30; (33, 16), (4, 17)),
    ],
    // Version 27
    [
        blocks!(30; (8, 122), (4, 123)),
        blocks!(28; (22, 45), (3, 46)),
        blocks!(30; (8, 23), (26, 24)),
        blocks!(30; (12, 15), (28, 16)),
    ],
    // Version 28
    [
        blocks!(30; (3, 117), (10, 118)),
        blocks!(28; (3, 45), (23, 46)),
        blocks!(30; (4, 24), (31, 25)),
        blocks!(30; (11, 15), (31, 16)),
    ],
    // Version 29
    [
        blocks!(30; (7, 116), (7, 117)),
        blocks!(28; (21, 45), (7, 46)),
        blocks!(30; (1, 23), (37, 24)),
        blocks!(30; (19, 15), (26, 16)),
    ],
    // Version 30
    [
        blocks!(30; (5, 115), (10, 116)),
        blocks!(28; (19, 47), (10, 48)),
        blocks!(30; (15, 24), (25, 25)),
        blocks!(30; (23, 15), (25, 16)),
    ],
    // Version 31
    [
        blocks!(30; (13, 115), (3, 116)),
        blocks!(28; (2, 46), (29, 47)),
        blocks!(30; (42, 24), (1, 25)),
        blocks!(30; (23, 15), (28, 16)),
    ],
    // Version 32
    [
        blocks!(30; (17, 115)),
        blocks!(28; (10, 46), (23, 47)),
        blocks!(30; (10, 24), (35, 25)),
        blocks!(30; (19, 15), (35, 16)),
    ],
    // Version 33
    [
        blocks!(30; (17, 115), (1, 116)),
        blocks!(28; (14, 46), (21, 47)),
        blocks!(30; (29, 24), (19, 25)),
        blocks!(30; (11, 15), (46, 16)),
    ],
    // Version 34
    [
        blocks!(30; (13, 115), (6, 116)),
        blocks!(28; (14, 46), (23, 47)),
        blocks!(30; (44, 24), (7, 25)),
        blocks!(30; (59, 16), (1, 17)),
    ],
    // Version 35
    [
        blocks!(30; (12, 121), (7, 122)),
        blocks!(28; (12, 47), (26, 48)),
        blocks!(30; (39, 24), (14, 25)),
        blocks!(30; (22, 15), (41, 16)),
    ],
    // Version 36
    [
        blocks!(30; (6, 121), (14, 122)),
        blocks!(28; (6, 47), (34, 48)),
        blocks!(30; (46, 24), (10, 25)),
        blocks!(30; (2, 15), (64, 16)),
    ],
    // Version 37
    [
        blocks!(30; (17, 122), (4, 123)),
        blocks!(28; (29, 46), (14, 47)),
        blocks!(30; (49, 24), (10, 25)),
        blocks!(30; (24, 15), (46, 16)),
    ],
    // Version 38
    [
        blocks!(30; (4, 122), (18, 123)),
        blocks!(28; (13, 46), (32, 47)),
        blocks!(30; (48, 24), (14, 25)),
        blocks!(30; (42, 15), (32, 16)),
    ],
    // Version 39
    [
        blocks!(30; (20, 117), (4, 118)),
        blocks!(28; (40, 47), (7, 48)),
        blocks!(30; (43, 24), (22, 25)),
        blocks!(30; (10, 15), (67, 16)),
    ],
    // Version 40
    [
        blocks!(30; (19, 118), (6, 119)),
        blocks!(28; (18, 47), (31, 48)),
        blocks!(30; (34, 24), (34, 25)),
        blocks!(30; (20, 15), (61, 16)),
    ],
];

// Alignment pattern centre coordinates per version
#[rustfmt::skip]
pub(crate) static ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];
