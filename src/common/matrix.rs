use std::fmt::{Display, Formatter};

// Canvas
//------------------------------------------------------------------------------

/// Anything function patterns can be stamped onto. `x` is the column and `y`
/// the row.
pub trait Canvas {
    fn width(&self) -> usize;

    fn set_module(&mut self, x: usize, y: usize, dark: bool);
}

// Byte matrix
//------------------------------------------------------------------------------

/// Working grid, one byte per module, 1 for dark. Kept in row major and column
/// major order at once so that both rows and columns scan as slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteMatrix {
    width: usize,
    height: usize,
    rows: Vec<u8>,
    cols: Vec<u8>,
}

impl ByteMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self { width, height, rows: vec![0; len], cols: vec![0; len] }
    }

    pub fn square(width: usize) -> Self {
        Self::new(width, width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.width && y < self.height, "Out of bounds: ({x}, {y})");
        self.rows[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        debug_assert!(x < self.width && y < self.height, "Out of bounds: ({x}, {y})");
        self.rows[y * self.width + x] = value;
        self.cols[x * self.height + y] = value;
    }

    #[inline]
    pub fn toggle(&mut self, x: usize, y: usize) {
        self.set(x, y, self.get(x, y) ^ 1);
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.rows[y * self.width..(y + 1) * self.width]
    }

    pub fn column(&self, x: usize) -> &[u8] {
        &self.cols[x * self.height..(x + 1) * self.height]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.chunks_exact(self.width)
    }

    pub fn columns(&self) -> impl Iterator<Item = &[u8]> {
        self.cols.chunks_exact(self.height)
    }

    pub fn count(&self, value: u8) -> usize {
        self.rows.iter().filter(|&&v| v == value).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.height * (self.width + 1) + 1);
        res.push('\n');
        for row in self.rows() {
            res.extend(row.iter().map(|&v| if v == 0 { '.' } else { '#' }));
            res.push('\n');
        }
        res
    }
}

impl Canvas for ByteMatrix {
    fn width(&self) -> usize {
        self.width
    }

    fn set_module(&mut self, x: usize, y: usize, dark: bool) {
        self.set(x, y, dark as u8);
    }
}


// Bit matrix
//------------------------------------------------------------------------------

/// Final symbol, one bit per module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    words_per_row: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        let words_per_row = width.div_ceil(64);
        Self { width, height, words_per_row, words: vec![0; words_per_row * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width && y < self.height, "Module out of bounds: ({x}, {y})");
        (self.words[y * self.words_per_row + x / 64] >> (x % 64)) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        assert!(x < self.width && y < self.height, "Module out of bounds: ({x}, {y})");
        let word = &mut self.words[y * self.words_per_row + x / 64];
        if dark {
            *word |= 1 << (x % 64);
        } else {
            *word &= !(1 << (x % 64));
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl From<&ByteMatrix> for BitMatrix {
    fn from(matrix: &ByteMatrix) -> Self {
        let mut res = Self::new(matrix.width(), matrix.height());
        for (y, row) in matrix.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                if v != 0 {
                    res.set(x, y, true);
                }
            }
        }
        res
    }
}

impl Display for BitMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            let row: String = (0..self.width).map(|x| if self.get(x, y) { '#' } else { '.' }).collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
