//! Density-normalized 2D histograms and the hue/val accumulators.
use crate::filters::gaussian_blur;
use crate::grid::Grid;
use log::{debug, warn};
use ndarray::{ArrayD, Axis};
use num_complex::Complex64;

/// Equal-width binning of `[-lim, lim]` into `bins` intervals.
///
/// Edges are `-lim + i * (2 lim / bins)` with the last edge pinned to `lim`,
/// and lookups use a right-sided search over them, so samples sitting on an
/// edge land in the same bin as with NumPy's `histogram2d`.
#[derive(Clone, Debug, PartialEq)]
pub struct BinSpec {
    pub bins: usize,
    pub lim: f64,
    edges: Vec<f64>,
}

impl BinSpec {
    pub fn new(bins: usize, lim: f64) -> Self {
        let step = 2.0 * lim / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| i as f64 * step - lim).collect();
        if let Some(last) = edges.last_mut() {
            *last = lim;
        }
        Self { bins, lim, edges }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Nominal width `2 lim / bins`.
    #[inline]
    pub fn bin_width(&self) -> f64 {
        2.0 * self.lim / self.bins as f64
    }

    /// Width of bin `i` from its actual edges.
    #[inline]
    pub fn width(&self, i: usize) -> f64 {
        self.edges[i + 1] - self.edges[i]
    }

    /// Bin index of `x`, or `None` when outside `[-lim, lim]` or NaN.
    ///
    /// Intervals are half-open except the last, which also holds `lim`.
    #[inline]
    pub fn index(&self, x: f64) -> Option<usize> {
        if x.is_nan() {
            return None;
        }
        let mut k = self.edges.partition_point(|&e| e <= x);
        if self.edges.last() == Some(&x) {
            k -= 1;
        }
        (1..=self.bins).contains(&k).then(|| k - 1)
    }
}

/// One per-dimension histogram plus its sample bookkeeping.
#[derive(Clone, Debug)]
pub struct Histogram2d {
    pub density: Grid,
    pub in_range: u64,
    pub dropped: u64,
}

impl Histogram2d {
    /// Bin `(re, im)` pairs and normalize so the grid integrates to 1.
    ///
    /// With no in-range samples the density stays all zeros.
    pub fn from_samples<'a, I>(samples: I, binning: &BinSpec) -> Self
    where
        I: IntoIterator<Item = &'a Complex64>,
    {
        let mut density = Grid::square(binning.bins);
        let mut in_range = 0u64;
        let mut dropped = 0u64;
        for z in samples {
            match (binning.index(z.re), binning.index(z.im)) {
                (Some(r), Some(c)) => {
                    let i = density.idx(r, c);
                    density.data[i] += 1.0;
                    in_range += 1;
                }
                _ => dropped += 1,
            }
        }
        if in_range > 0 {
            let total = in_range as f64;
            for r in 0..binning.bins {
                let wr = binning.width(r);
                for (c, v) in density.row_mut(r).iter_mut().enumerate() {
                    *v = *v / total / wr / binning.width(c);
                }
            }
        }
        Self {
            density,
            in_range,
            dropped,
        }
    }
}

/// Running hue/val sums over all dimensions, before normalization.
#[derive(Clone, Debug)]
pub struct Accumulators {
    /// `sum_d (d + 1) * blurred_d`
    pub hue: Grid,
    /// `sum_d raw_d`
    pub val: Grid,
    pub dimensions: usize,
    pub samples_per_dimension: usize,
    pub dropped: u64,
}

impl Accumulators {
    pub fn new(bins: usize) -> Self {
        Self {
            hue: Grid::square(bins),
            val: Grid::square(bins),
            dimensions: 0,
            samples_per_dimension: 0,
            dropped: 0,
        }
    }

    /// Fold in the histogram of trailing index `dim`.
    ///
    /// `blur_sigma` only affects the hue channel; `None` uses the raw histogram.
    pub fn add_dimension(&mut self, dim: usize, hist: &Histogram2d, blur_sigma: Option<f64>) {
        let weight = (dim + 1) as f64;
        match blur_sigma {
            Some(sigma) => {
                let blurred = gaussian_blur(&hist.density, sigma);
                self.hue.add_scaled(&blurred, weight);
            }
            None => self.hue.add_scaled(&hist.density, weight),
        }
        self.val.add_scaled(&hist.density, 1.0);
        self.dimensions += 1;
        self.dropped += hist.dropped;
    }
}

/// Accumulate every trailing-axis slice of `stack`.
pub fn accumulate_stack(
    stack: &ArrayD<Complex64>,
    binning: &BinSpec,
    blur_sigma: Option<f64>,
) -> Accumulators {
    let mut acc = Accumulators::new(binning.bins);
    let Some(last) = stack.ndim().checked_sub(1) else {
        return acc;
    };
    let depth = stack.len_of(Axis(last));
    acc.samples_per_dimension = if depth == 0 { 0 } else { stack.len() / depth };
    for dim in 0..depth {
        let slice = stack.index_axis(Axis(last), dim);
        let hist = Histogram2d::from_samples(slice.iter(), binning);
        if hist.in_range == 0 {
            warn!(
                "dimension {dim}: none of {} samples fall inside [-{lim}, {lim}]",
                hist.dropped,
                lim = binning.lim
            );
        }
        debug!(
            "dimension {dim}: in_range={} dropped={}",
            hist.in_range, hist.dropped
        );
        acc.add_dimension(dim, &hist, blur_sigma);
    }
    acc
}
