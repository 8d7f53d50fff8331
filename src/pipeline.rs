//! Histogram builder driving the batch run end-to-end.
//!
//! [`HistogramBuilder`] runs file selection, loading, per-dimension histogram
//! accumulation, normalization, HSV→RGB composition and the final write.
//! Each stage is also callable on its own so tools can inspect intermediates.
//!
//! ```no_run
//! use phase_hist::{HistogramBuilder, HistogramConfig};
//!
//! # fn main() -> phase_hist::Result<()> {
//! let builder = HistogramBuilder::new(HistogramConfig {
//!     bins: 512,
//!     ..Default::default()
//! })?;
//! let report = builder.run()?;
//! println!("wrote {:?} in {:.1} ms", report.output_shape, report.timing.total_ms);
//! # Ok(())
//! # }
//! ```
use crate::arrays::{load_stack, save_array};
use crate::color::compose_rgb;
use crate::config::{HistogramConfig, NORMALIZE_EPS};
use crate::error::{HistogramError, Result};
use crate::histogram::{accumulate_stack, Accumulators, BinSpec};
use crate::io::{save_rgb_png, write_json_file};
use crate::report::{elapsed_ms, RunReport, TimingBreakdown};
use crate::selection::select_files;
use log::{debug, info, warn};
use ndarray::{Array3, ArrayD};
use num_complex::Complex64;
use std::path::PathBuf;
use std::time::Instant;

/// Constant saturation of the output image.
pub const SATURATION: f64 = 1.0;

#[derive(Clone, Debug)]
pub struct HistogramBuilder {
    config: HistogramConfig,
}

impl HistogramBuilder {
    /// Validate `config` and wrap it.
    pub fn new(config: HistogramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn bin_spec(&self) -> BinSpec {
        BinSpec::new(self.config.bins, self.config.lim)
    }

    /// Input files in sorted order; fails with `NoInputFiles` when empty.
    pub fn select_inputs(&self) -> Result<Vec<PathBuf>> {
        let cfg = &self.config;
        select_files(
            &cfg.arrays_dir,
            cfg.filter_arrays,
            cfg.dimension,
            cfg.iterations,
        )
    }

    /// Load and stack `files` as `[files, ...shape]`.
    pub fn load_stack(&self, files: &[PathBuf]) -> Result<ArrayD<Complex64>> {
        if files.is_empty() {
            return Err(HistogramError::NoInputFiles {
                dir: self.config.arrays_dir.clone(),
            });
        }
        let stack = load_stack(files)?;
        let depth = stack.shape().last().copied().unwrap_or(0);
        if depth != self.config.dimension {
            warn!(
                "trailing axis has {depth} entries but dimension={} was configured; using {depth}",
                self.config.dimension
            );
        }
        Ok(stack)
    }

    /// Per-dimension histograms summed into the raw hue/val accumulators.
    pub fn accumulate(&self, stack: &ArrayD<Complex64>) -> Accumulators {
        let blur = self
            .config
            .blur_enabled()
            .then_some(self.config.blur_sigma);
        accumulate_stack(stack, &self.bin_spec(), blur)
    }

    /// Normalize the accumulators and convert them to a `[bins, bins, 3]` RGB array.
    pub fn render(&self, acc: Accumulators) -> Result<Array3<f64>> {
        let Accumulators {
            mut hue, mut val, ..
        } = acc;
        hue.normalize_min_max(NORMALIZE_EPS);
        val.normalize_min_max(NORMALIZE_EPS);
        if val.max() == 0.0 {
            warn!("value channel is zero everywhere; output image is black");
        }
        compose_rgb(&hue, SATURATION, &val)
    }

    /// Run every stage and write the outputs.
    ///
    /// Nothing is written unless all stages before the write succeed.
    pub fn run(&self) -> Result<RunReport> {
        let cfg = &self.config;
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let start = Instant::now();
        let files = self.select_inputs()?;
        timing.push("select", start);
        info!(
            "selected {} input file(s) from {}",
            files.len(),
            cfg.arrays_dir.display()
        );

        let start = Instant::now();
        let stack = self.load_stack(&files)?;
        timing.push("load", start);
        let stacked_shape = stack.shape().to_vec();
        info!("stacked input shape {stacked_shape:?}");

        let start = Instant::now();
        let acc = self.accumulate(&stack);
        timing.push("accumulate", start);
        let dimensions = acc.dimensions;
        let samples_per_dimension = acc.samples_per_dimension;
        let dropped_samples = acc.dropped;
        drop(stack);

        let start = Instant::now();
        let rgb = self.render(acc)?;
        timing.push("render", start);

        let start = Instant::now();
        save_array(&cfg.out_path, &rgb)?;
        info!(
            "saved {:?} histogram to {}",
            rgb.shape(),
            cfg.out_path.display()
        );
        if let Some(png) = &cfg.preview_png {
            save_rgb_png(&rgb, png)?;
            info!("saved preview to {}", png.display());
        }
        timing.push("write", start);
        timing.total_ms = elapsed_ms(total_start);

        for stage in &timing.stages {
            debug!("stage {} took {:.3} ms", stage.label, stage.elapsed_ms);
        }

        let report = RunReport {
            input_files: files,
            stacked_shape,
            dimensions,
            samples_per_dimension,
            dropped_samples,
            output_path: cfg.out_path.clone(),
            output_shape: rgb.shape().to_vec(),
            timing,
        };
        if let Some(path) = &cfg.report_json {
            write_json_file(path, &report)?;
            info!("saved run report to {}", path.display());
        }
        Ok(report)
    }
}

/// Validate `config` and run the whole pipeline.
pub fn run(config: HistogramConfig) -> Result<RunReport> {
    HistogramBuilder::new(config)?.run()
}
