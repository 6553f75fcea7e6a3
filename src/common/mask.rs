use std::fmt::{Display, Formatter};
use std::ops::Deref;

use log::trace;

use super::error::{QrError, QrResult};
use super::function_modules::FunctionModules;
use super::matrix::ByteMatrix;
use super::metadata::Version;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [Self; 8] = [Self(0), Self(1), Self(2), Self(3), Self(4), Self(5), Self(6), Self(7)];

    pub fn new(pattern: u8) -> QrResult<Self> {
        if pattern >= 8 {
            return Err(QrError::OutOfRange("mask pattern must be within 0..=7"));
        }
        Ok(Self(pattern))
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MaskPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

mod mask_functions {
    pub fn checkerboard(x: usize, y: usize) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: usize, y: usize) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: usize, _: usize) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: usize, y: usize) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: usize, y: usize) -> bool {
        ((y >> 1) + (x / 3)) & 1 == 0
    }

    pub fn fields(x: usize, y: usize) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: usize, y: usize) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: usize, y: usize) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    /// Predicate over `(x, y)` telling which modules the pattern flips.
    pub fn mask_functions(self) -> fn(usize, usize) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern"),
        }
    }
}

/// Flips every maskable module selected by the pattern. Function modules are
/// left alone.
pub fn apply_mask(matrix: &mut ByteMatrix, version: Version, pattern: MaskPattern) {
    debug_assert!(matrix.width() == version.width(), "Matrix does not match version {version}");

    let mask_fn = pattern.mask_functions();
    let fm = FunctionModules::get_for_version(version);
    for y in 0..matrix.height() {
        for range in fm.maskable_ranges(y) {
            for x in range.clone() {
                if mask_fn(x, y) {
                    matrix.toggle(x, y);
                }
            }
        }
    }
}


// Penalty scoring
//------------------------------------------------------------------------------

/// Sum of the run, finder-like pattern, 2x2 block and balance penalties.
pub fn calculate_penalty(matrix: &ByteMatrix) -> u32 {
    let run = matrix.rows().chain(matrix.columns()).map(run_penalty).sum::<u32>();
    let pattern = matrix.rows().chain(matrix.columns()).map(pattern_penalty).sum::<u32>();
    let block = block_penalty(matrix);
    let balance = balance_penalty(matrix);
    trace!("Penalty: run {run}, pattern {pattern}, block {block}, balance {balance}");
    run + pattern + block + balance
}

// Each maximal run of at least 5 equal modules scores its length minus 2
fn run_penalty(line: &[u8]) -> u32 {
    line.chunk_by(|a, b| a == b).filter(|run| run.len() >= 5).map(|run| run.len() as u32 - 2).sum()
}

// 1:1:3:1:1 finder-like pattern with 4 light modules on either side. A pattern
// light on both sides is counted once.
fn pattern_penalty(line: &[u8]) -> u32 {
    let mut pen = 0;
    for (j, window) in line.windows(FINDER_LIKE.len()).enumerate() {
        if window == FINDER_LIKE {
            if j >= 4 && line[j - 4..j].iter().all(|&v| v == 0) {
                continue;
            }
            pen += 40;
        } else if window.iter().rev().eq(FINDER_LIKE.iter()) {
            pen += 40;
        }
    }
    pen
}

fn block_penalty(matrix: &ByteMatrix) -> u32 {
    let mut pen = 0;
    for y in 0..matrix.height().saturating_sub(1) {
        let (top, bottom) = (matrix.row(y), matrix.row(y + 1));
        for x in 0..matrix.width() - 1 {
            let clr = top[x];
            if clr == top[x + 1] && clr == bottom[x] && clr == bottom[x + 1] {
                pen += 3;
            }
        }
    }
    pen
}

fn balance_penalty(matrix: &ByteMatrix) -> u32 {
    let total = matrix.width() * matrix.height();
    let dark = matrix.count(1);
    let ratio = (dark * 100 / total).abs_diff(50);
    BALANCE_PENALTY[ratio / 5]
}


// Global constants
//------------------------------------------------------------------------------

static FINDER_LIKE: [u8; 11] = [1, 0, 1, 1, 1, 0, 1, 0, 0, 0, 0];

// Indexed by the distance from a 50% dark ratio, in steps of 5%
static BALANCE_PENALTY: [u32; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
