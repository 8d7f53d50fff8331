//! Run summary returned by the pipeline and optionally written as JSON.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

/// Wall time spent in one pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-stage timings of a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, start: Instant) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms: elapsed_ms(start),
        });
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[inline]
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input_files: Vec<PathBuf>,
    /// `[files, ...sample axes..., D]`
    pub stacked_shape: Vec<usize>,
    pub dimensions: usize,
    pub samples_per_dimension: usize,
    /// Samples outside `[-lim, lim]²`, summed over all dimensions.
    pub dropped_samples: u64,
    pub output_path: PathBuf,
    pub output_shape: Vec<usize>,
    pub timing: TimingBreakdown,
}
