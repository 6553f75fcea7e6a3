use std::ops::Range;
use std::sync::OnceLock;

use log::trace;

use super::matrix::{ByteMatrix, Canvas};
use super::metadata::Version;
use crate::builder::symbol::encode_function_patterns;

// Function modules
//------------------------------------------------------------------------------

/// Which modules of a version belong to function patterns, and the runs of
/// maskable modules left in each row.
#[derive(Debug)]
pub struct FunctionModules {
    version: Version,
    // 1 marks a function module
    matrix: ByteMatrix,
    ranges: Vec<Vec<Range<usize>>>,
}

static FUNCTION_MODULES: [OnceLock<FunctionModules>; 40] = [const { OnceLock::new() }; 40];

impl FunctionModules {
    /// Shared map for `version`, built on first use.
    pub fn get_for_version(version: Version) -> &'static Self {
        FUNCTION_MODULES[*version as usize - 1].get_or_init(|| {
            trace!("Building function module map for version {version}");
            Self::build(version)
        })
    }

    fn build(version: Version) -> Self {
        let mut marker = FunctionMarker(ByteMatrix::square(version.width()));
        encode_function_patterns(&mut marker, version);
        let matrix = marker.0;
        let ranges = matrix.rows().map(maskable_runs).collect();
        Self { version, matrix, ranges }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.matrix.get(x, y) != 0
    }

    /// Contiguous runs of maskable modules in row `y`, left to right.
    pub fn maskable_ranges(&self, y: usize) -> &[Range<usize>] {
        &self.ranges[y]
    }

    pub fn maskable_count(&self) -> usize {
        self.ranges.iter().flatten().map(|r| r.len()).sum()
    }

    pub fn matrix(&self) -> &ByteMatrix {
        &self.matrix
    }
}

fn maskable_runs(row: &[u8]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for (x, &v) in row.iter().enumerate() {
        match (v == 0, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push(s..x);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..row.len());
    }
    runs
}

// Marks every stamped module regardless of its colour
struct FunctionMarker(ByteMatrix);

impl Canvas for FunctionMarker {
    fn width(&self) -> usize {
        self.0.width()
    }

    fn set_module(&mut self, x: usize, y: usize, _dark: bool) {
        self.0.set(x, y, 1);
    }
}
