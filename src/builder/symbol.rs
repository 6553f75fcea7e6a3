use log::{debug, trace};

use crate::common::bit_buffer::BitBuffer;
use crate::common::function_modules::FunctionModules;
use crate::common::iter::EncRegionIter;
use crate::common::mask::{apply_mask, calculate_penalty, MaskPattern};
use crate::common::matrix::{BitMatrix, ByteMatrix, Canvas};
use crate::common::metadata::{format_info, ECLevel, Version};

// Finder pattern
//------------------------------------------------------------------------------

/// Stamps the three 7x7 finder patterns with their one module separators.
pub fn encode_position_detection_pattern<C: Canvas>(canvas: &mut C) {
    let w = canvas.width() as isize;
    for (cx, cy) in [(3, 3), (w - 4, 3), (3, w - 4)] {
        encode_finder_pattern_at(canvas, cx, cy);
    }
}

fn encode_finder_pattern_at<C: Canvas>(canvas: &mut C, cx: isize, cy: isize) {
    let w = canvas.width() as isize;
    for dy in -4..=4isize {
        for dx in -4..=4isize {
            let (x, y) = (cx + dx, cy + dy);
            if !(0..w).contains(&x) || !(0..w).contains(&y) {
                continue;
            }
            let dark = !matches!(dx.abs().max(dy.abs()), 2 | 4);
            canvas.set_module(x as usize, y as usize, dark);
        }
    }
}

// Alignment pattern
//------------------------------------------------------------------------------

/// Stamps a 5x5 alignment pattern at every pair of centre coordinates except
/// the three that would overlap a finder pattern.
pub fn encode_position_adjustment_patterns<C: Canvas>(canvas: &mut C, version: Version) {
    let positions = version.alignment_pattern();
    for &y in positions {
        for &x in positions {
            encode_alignment_pattern_at(canvas, x, y);
        }
    }
}

fn encode_alignment_pattern_at<C: Canvas>(canvas: &mut C, x: usize, y: usize) {
    let w = canvas.width();
    if (y == 6 && (x == 6 || x == w - 7)) || (y == w - 7 && x == 6) {
        return;
    }
    for dy in -2..=2isize {
        for dx in -2..=2isize {
            let dark = dx.abs().max(dy.abs()) != 1;
            canvas.set_module(x.wrapping_add_signed(dx), y.wrapping_add_signed(dy), dark);
        }
    }
}

// Timing pattern
//------------------------------------------------------------------------------

pub fn encode_timing_patterns<C: Canvas>(canvas: &mut C) {
    let w = canvas.width();
    for i in 8..w - 8 {
        let dark = i & 1 == 0;
        canvas.set_module(6, i, dark);
        canvas.set_module(i, 6, dark);
    }
}

pub fn encode_static_dark_module<C: Canvas>(canvas: &mut C) {
    let w = canvas.width();
    canvas.set_module(8, w - 8, true);
}

// Format & version info
//------------------------------------------------------------------------------

/// Places both copies of the format information for `ecl` and `mask`, bit 0
/// being the least significant bit of the 15 bit word.
pub fn encode_format_information<C: Canvas>(canvas: &mut C, ecl: ECLevel, mask: MaskPattern) {
    let w = canvas.width();
    let bits = format_info(ecl, *mask);
    let bit = |i: usize| (bits >> i) & 1 == 1;

    // Around the top left finder
    for i in 0..6 {
        canvas.set_module(8, i, bit(i));
    }
    canvas.set_module(8, 7, bit(6));
    canvas.set_module(8, 8, bit(7));
    canvas.set_module(7, 8, bit(8));
    for i in 9..15 {
        canvas.set_module(14 - i, 8, bit(i));
    }

    // Split between the top right and bottom left finders
    for i in 0..8 {
        canvas.set_module(w - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        canvas.set_module(8, w - 15 + i, bit(i));
    }

    encode_static_dark_module(canvas);
}

/// Places both 6x3 copies of the version information. Versions below 7 carry
/// none.
pub fn encode_version_information<C: Canvas>(canvas: &mut C, version: Version) {
    if *version < 7 {
        return;
    }
    let w = canvas.width();
    let bits = version.version_info();
    for i in 0..18 {
        let dark = (bits >> i) & 1 == 1;
        let (a, b) = (w - 11 + i % 3, i / 3);
        canvas.set_module(a, b, dark);
        canvas.set_module(b, a, dark);
    }
}

/// Every function pattern of `version`, with placeholder format information.
pub fn encode_function_patterns<C: Canvas>(canvas: &mut C, version: Version) {
    encode_position_detection_pattern(canvas);
    encode_position_adjustment_patterns(canvas, version);
    encode_timing_patterns(canvas);
    encode_format_information(canvas, ECLevel::M, MaskPattern::ALL[0]);
    encode_version_information(canvas, version);
}


// Data placement
//------------------------------------------------------------------------------

/// Writes the codeword bits into the non-function modules in zig-zag order.
/// Remainder modules stay light.
pub fn encode_data_bits(matrix: &mut ByteMatrix, version: Version, data: &BitBuffer) {
    let fm = FunctionModules::get_for_version(version);
    let mut bits = data.iter();
    let mut placed = 0;
    for (x, y) in EncRegionIter::new(version) {
        if fm.is_function(x, y) {
            continue;
        }
        match bits.next() {
            Some(bit) => {
                matrix.set(x, y, bit as u8);
                placed += 1;
            }
            None => break,
        }
    }
    assert_eq!(
        placed,
        version.total_codewords() << 3,
        "Placed bits do not match the codeword count of version {version}"
    );
}


// Symbol
//------------------------------------------------------------------------------

/// Lays out a complete symbol from the interleaved codewords. Unless a mask
/// is forced, every pattern is tried and the first one with the lowest penalty
/// wins.
pub fn build_symbol(
    version: Version,
    ecl: ECLevel,
    codewords: &BitBuffer,
    mask: Option<MaskPattern>,
) -> (BitMatrix, MaskPattern) {
    let mut matrix = ByteMatrix::square(version.width());
    encode_function_patterns(&mut matrix, version);
    encode_data_bits(&mut matrix, version, codewords);

    let (pattern, mut masked) = match mask {
        Some(pattern) => {
            apply_mask(&mut matrix, version, pattern);
            (pattern, matrix)
        }
        None => select_mask(&matrix, version),
    };

    encode_format_information(&mut masked, ecl, pattern);
    (BitMatrix::from(&masked), pattern)
}

fn select_mask(matrix: &ByteMatrix, version: Version) -> (MaskPattern, ByteMatrix) {
    let masked_with = |pattern| {
        let mut m = matrix.clone();
        apply_mask(&mut m, version, pattern);
        let penalty = calculate_penalty(&m);
        trace!("Mask {pattern}: penalty {penalty}");
        (penalty, m)
    };

    let mut best = MaskPattern::ALL[0];
    let (mut best_penalty, mut best_matrix) = masked_with(best);
    for &pattern in &MaskPattern::ALL[1..] {
        let (penalty, m) = masked_with(pattern);
        if penalty < best_penalty {
            (best, best_penalty, best_matrix) = (pattern, penalty, m);
        }
    }
    debug!("Selected mask {best} with penalty {best_penalty}");
    (best, best_matrix)
}
