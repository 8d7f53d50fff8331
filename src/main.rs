use clap::Parser;
use phase_hist::{load_config, run, HistogramConfig};
use std::path::PathBuf;

/// Render stacked complex-valued arrays as a false-color 2D histogram.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON file with any subset of the options below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bins per axis [default: 2160]
    #[arg(long)]
    bins: Option<usize>,

    /// Histogram range is [-lim, lim] on both axes [default: 1.42]
    #[arg(long)]
    lim: Option<f64>,

    /// Gaussian sigma for the hue channel, applied when > 1 [default: 0]
    #[arg(long)]
    blur_sigma: Option<f64>,

    /// Only read n_{dimension}_i_{iterations}_*.npy (default)
    #[arg(long, conflicts_with = "no_filter_arrays")]
    filter_arrays: bool,

    /// Read every entry of the arrays directory
    #[arg(long)]
    no_filter_arrays: bool,

    /// Trailing-axis size used in the file pattern [default: 100]
    #[arg(long)]
    dimension: Option<usize>,

    /// Iteration count used in the file pattern [default: 1002]
    #[arg(long)]
    iterations: Option<u64>,

    /// Directory holding the input arrays [default: arrays/]
    #[arg(long)]
    arrays_dir: Option<PathBuf>,

    /// Output .npy path [default: output/hist2d.npy]
    #[arg(long)]
    out_path: Option<PathBuf>,

    /// Also write an 8-bit PNG rendering here
    #[arg(long)]
    preview_png: Option<PathBuf>,

    /// Also write a JSON run report here
    #[arg(long)]
    report_json: Option<PathBuf>,
}

impl Args {
    /// Config file (or defaults) with explicit flags layered on top.
    fn into_config(self) -> phase_hist::Result<HistogramConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config(path)?,
            None => HistogramConfig::default(),
        };
        if let Some(v) = self.bins {
            cfg.bins = v;
        }
        if let Some(v) = self.lim {
            cfg.lim = v;
        }
        if let Some(v) = self.blur_sigma {
            cfg.blur_sigma = v;
        }
        if self.filter_arrays {
            cfg.filter_arrays = true;
        }
        if self.no_filter_arrays {
            cfg.filter_arrays = false;
        }
        if let Some(v) = self.dimension {
            cfg.dimension = v;
        }
        if let Some(v) = self.iterations {
            cfg.iterations = v;
        }
        if let Some(v) = self.arrays_dir {
            cfg.arrays_dir = v;
        }
        if let Some(v) = self.out_path {
            cfg.out_path = v;
        }
        if self.preview_png.is_some() {
            cfg.preview_png = self.preview_png;
        }
        if self.report_json.is_some() {
            cfg.report_json = self.report_json;
        }
        Ok(cfg)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = try_main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> phase_hist::Result<()> {
    let config = Args::parse().into_config()?;
    let report = run(config)?;
    println!(
        "Saved {:?} histogram of {} file(s) to {} ({:.1} ms)",
        report.output_shape,
        report.input_files.len(),
        report.output_path.display(),
        report.timing.total_ms
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "phase-hist",
            "--bins",
            "64",
            "--no-filter-arrays",
            "--out-path",
            "out/x.npy",
        ]);
        let cfg = args.into_config().unwrap();
        assert_eq!(cfg.bins, 64);
        assert!(!cfg.filter_arrays);
        assert_eq!(cfg.out_path, PathBuf::from("out/x.npy"));
        assert_eq!(cfg.lim, 1.42);
        assert_eq!(cfg.dimension, 100);
    }

    #[test]
    fn filter_flags_conflict() {
        let res = Args::try_parse_from(["phase-hist", "--filter-arrays", "--no-filter-arrays"]);
        assert!(res.is_err());
    }
}
