#![doc = include_str!("../README.md")]

pub mod arrays;
pub mod color;
pub mod config;
pub mod error;
pub mod filters;
pub mod grid;
pub mod histogram;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod selection;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::{load_config, HistogramConfig};
pub use crate::error::{HistogramError, Result};
pub use crate::histogram::{Accumulators, BinSpec};
pub use crate::pipeline::{run, HistogramBuilder};
pub use crate::report::RunReport;
pub use crate::selection::matches;

/// Small prelude for scripts.
///
/// ```no_run
/// use phase_hist::prelude::*;
///
/// # fn main() -> phase_hist::Result<()> {
/// let report = run(HistogramConfig {
///     dimension: 2,
///     iterations: 10,
///     ..Default::default()
/// })?;
/// println!("dimensions={} dropped={}", report.dimensions, report.dropped_samples);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{run, HistogramBuilder, HistogramConfig, HistogramError, RunReport};
}
