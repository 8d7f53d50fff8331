//! Output helpers.
//!
//! - `ensure_parent_dir`: create the parent directories of an output path.
//! - `save_rgb_png`: write a `[rows, cols, 3]` array in `[0, 1]` to an 8-bit PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{HistogramError, Result};
use image::{ImageBuffer, Rgb, RgbImage};
use ndarray::Array3;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| HistogramError::io(parent, e))?;
        }
    }
    Ok(())
}

#[inline]
fn to_u8(c: f64) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Save an RGB array as PNG; row `r`, column `c` becomes pixel `(x = c, y = r)`.
pub fn save_rgb_png(rgb: &Array3<f64>, path: &Path) -> Result<()> {
    let (rows, cols, channels) = rgb.dim();
    if channels != 3 {
        return Err(HistogramError::Encode {
            path: path.to_path_buf(),
            reason: format!("expected 3 channels, got {channels}"),
        });
    }
    ensure_parent_dir(path)?;
    let img: RgbImage = ImageBuffer::from_fn(cols as u32, rows as u32, |x, y| {
        let (r, c) = (y as usize, x as usize);
        Rgb([
            to_u8(rgb[[r, c, 0]]),
            to_u8(rgb[[r, c, 1]]),
            to_u8(rgb[[r, c, 2]]),
        ])
    });
    img.save(path).map_err(|e| HistogramError::Encode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| HistogramError::Encode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| HistogramError::io(path, e))
}
