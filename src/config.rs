//! Run configuration for the histogram builder.
//!
//! A [`HistogramConfig`] is built once (defaults, optionally a JSON file,
//! then command-line overrides) and handed by value to the pipeline. Every
//! field is defaulted, so a JSON file may set any subset of them.
use crate::error::{HistogramError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Offset added to the accumulator maximum during normalization.
pub const NORMALIZE_EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramConfig {
    /// Bins per axis; the output image is `bins × bins`.
    pub bins: usize,
    /// Histogram range is `[-lim, lim]` on both the real and imaginary axis.
    pub lim: f64,
    /// Gaussian sigma for the hue channel; smoothing runs only when `> 1`.
    pub blur_sigma: f64,
    /// Select `n_{dimension}_i_{iterations}_*.npy` instead of every entry.
    pub filter_arrays: bool,
    /// Expected size of the trailing axis, also part of the file pattern.
    pub dimension: usize,
    /// Only used in the file pattern.
    pub iterations: u64,
    pub arrays_dir: PathBuf,
    pub out_path: PathBuf,
    /// Optional 8-bit PNG rendering of the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_png: Option<PathBuf>,
    /// Optional JSON run report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_json: Option<PathBuf>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: 2160,
            lim: 1.42,
            blur_sigma: 0.0,
            filter_arrays: true,
            dimension: 100,
            iterations: 1002,
            arrays_dir: PathBuf::from("arrays/"),
            out_path: PathBuf::from("output/hist2d.npy"),
            preview_png: None,
            report_json: None,
        }
    }
}

impl HistogramConfig {
    /// Reject configurations that would produce degenerate histograms.
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(HistogramError::invalid("bins", "must be positive"));
        }
        if !self.lim.is_finite() || self.lim <= 0.0 {
            return Err(HistogramError::invalid(
                "lim",
                format!("must be a positive finite number, got {}", self.lim),
            ));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(HistogramError::invalid(
                "blur_sigma",
                format!("must be non-negative, got {}", self.blur_sigma),
            ));
        }
        if self.dimension == 0 {
            return Err(HistogramError::invalid("dimension", "must be positive"));
        }
        if self.iterations == 0 {
            return Err(HistogramError::invalid("iterations", "must be positive"));
        }
        Ok(())
    }

    /// Whether the hue channel gets a Gaussian pass.
    #[inline]
    pub fn blur_enabled(&self) -> bool {
        self.blur_sigma > 1.0
    }
}

pub fn load_config(path: &Path) -> Result<HistogramConfig> {
    let data = fs::read_to_string(path).map_err(|e| HistogramError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|e| HistogramError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = HistogramConfig::default();
        assert_eq!(cfg.bins, 2160);
        assert_eq!(cfg.out_path, PathBuf::from("output/hist2d.npy"));
        assert!(cfg.validate().is_ok());
        assert!(!cfg.blur_enabled());
    }

    #[test]
    fn rejects_degenerate_values() {
        let cases = [
            HistogramConfig {
                bins: 0,
                ..Default::default()
            },
            HistogramConfig {
                lim: 0.0,
                ..Default::default()
            },
            HistogramConfig {
                lim: f64::NAN,
                ..Default::default()
            },
            HistogramConfig {
                blur_sigma: -1.0,
                ..Default::default()
            },
            HistogramConfig {
                dimension: 0,
                ..Default::default()
            },
        ];
        for cfg in cases {
            let err = cfg.validate().expect_err("config should be rejected");
            assert!(
                matches!(err, HistogramError::InvalidConfig { .. }),
                "unexpected error {err}"
            );
        }
    }

    #[test]
    fn blur_threshold_is_strict() {
        let mut cfg = HistogramConfig {
            blur_sigma: 1.0,
            ..Default::default()
        };
        assert!(!cfg.blur_enabled());
        cfg.blur_sigma = 1.5;
        assert!(cfg.blur_enabled());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: HistogramConfig =
            serde_json::from_str(r#"{ "bins": 64, "filter_arrays": false }"#).unwrap();
        assert_eq!(cfg.bins, 64);
        assert!(!cfg.filter_arrays);
        assert_eq!(cfg.lim, 1.42);
        assert_eq!(cfg.dimension, 100);
        assert!(cfg.preview_png.is_none());
    }
}
