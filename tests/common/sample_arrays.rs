use ndarray::{ArrayD, IxDyn};
use ndarray_npy::WriteNpyExt;
use num_complex::Complex64;
use std::fs::File;
use std::path::Path;

/// Write a complex `.npy` of the given shape into `dir/name`.
pub fn write_complex(dir: &Path, name: &str, shape: &[usize], values: &[Complex64]) {
    let arr = ArrayD::from_shape_vec(IxDyn(shape), values.to_vec())
        .expect("values must match shape");
    let file = File::create(dir.join(name)).expect("create input array");
    arr.write_npy(file).expect("write input array");
}

/// Deterministic spiral of `n` samples per dimension, shape `[n, dims]`.
///
/// Dimension `d` sits on a circle of radius `0.2 + 0.1 d`, so every
/// dimension lands in a distinct ring of the histogram.
pub fn spiral(n: usize, dims: usize, phase: f64) -> Vec<Complex64> {
    let mut out = Vec::with_capacity(n * dims);
    for i in 0..n {
        for d in 0..dims {
            let r = 0.2 + 0.1 * d as f64;
            let t = phase + i as f64 * 0.37;
            out.push(Complex64::from_polar(r, t));
        }
    }
    out
}
