//! Owned square-or-rectangular f64 grid in row-major layout.
//!
//! Used for per-dimension histograms and the hue/val accumulators. Row index
//! follows the first histogram coordinate (real part), column index the
//! second (imaginary part), matching the layout of the output array.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl Grid {
    /// Construct a zero-initialized `rows × cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Zero-initialized `n × n` grid.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: f64) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// `self += other * weight`, cell by cell. Shapes must agree.
    pub fn add_scaled(&mut self, other: &Grid, weight: f64) {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "grid shapes differ"
        );
        for (dst, &src) in self.data.iter_mut().zip(&other.data) {
            *dst += src * weight;
        }
    }

    /// Shift so the minimum is 0, then divide by `max + eps`.
    ///
    /// The result lies in `[0, 1)`; an all-constant grid becomes all zeros.
    pub fn normalize_min_max(&mut self, eps: f64) {
        if self.data.is_empty() {
            return;
        }
        let lo = self.min();
        for v in &mut self.data {
            *v -= lo;
        }
        let scale = self.max() + eps;
        for v in &mut self.data {
            *v /= scale;
        }
    }
}
