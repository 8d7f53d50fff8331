//! HSV→RGB conversion and composition of the output image.
use crate::error::{HistogramError, Result};
use crate::grid::Grid;
use ndarray::Array3;

/// Convert one HSV triple (all components in `[0, 1]`) to RGB.
///
/// Hue is a fraction of the full turn; `h = 1` wraps to red like `h = 0`.
#[inline]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

fn check_unit(channel: &'static str, grid: &Grid) -> Result<()> {
    for row in 0..grid.rows {
        for (col, &value) in grid.row(row).iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(HistogramError::ColorRange {
                    channel,
                    row,
                    col,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Stack `(hue, saturation, val)` per cell and convert to a `[rows, cols, 3]` RGB array.
///
/// Fails with [`HistogramError::ColorRange`] if any component is outside `[0, 1]`.
pub fn compose_rgb(hue: &Grid, saturation: f64, val: &Grid) -> Result<Array3<f64>> {
    assert_eq!(
        (hue.rows, hue.cols),
        (val.rows, val.cols),
        "hue and val grids differ in shape"
    );
    check_unit("hue", hue)?;
    check_unit("val", val)?;
    if !(0.0..=1.0).contains(&saturation) {
        return Err(HistogramError::ColorRange {
            channel: "saturation",
            row: 0,
            col: 0,
            value: saturation,
        });
    }

    let mut rgb = Array3::zeros((hue.rows, hue.cols, 3));
    for row in 0..hue.rows {
        for col in 0..hue.cols {
            let px = hsv_to_rgb(hue.get(row, col), saturation, val.get(row, col));
            for (ch, &c) in px.iter().enumerate() {
                rgb[[row, col, ch]] = c;
            }
        }
    }
    Ok(rgb)
}
