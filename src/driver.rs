//! Calibrates, times and collects every registry entry in order.

use crate::corpus::Corpus;
use crate::registry::{BenchmarkEntry, Registry, TrialSpec};
use crate::report::{ReportLine, ReportRow};
use crate::utils::Logger;
use anyhow::{bail, ensure, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Growth factor of the iteration count between calibration epochs.
const CALIBRATION_GROWTH: u64 = 10;

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// An epoch shorter than this is too noisy to keep.
    pub min_time: Duration,
    /// Total time budget for one entry, calibration included.
    pub max_time: Duration,
    pub epochs: u32,
    pub max_iters: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_time: Duration::from_micros(100),
            max_time: Duration::from_secs(1),
            epochs: 1000,
            max_iters: 1 << 32,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.epochs >= 1, "At least one measurement epoch is required");
        ensure!(self.max_iters >= 1, "Iteration ceiling must be at least 1");
        ensure!(!self.max_time.is_zero(), "Per-entry time budget must be positive");
        Ok(())
    }
}

/// Accumulated timing of one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub iterations: u64,
    pub elapsed: Duration,
    pub epochs: u32,
}

impl Measurement {
    /// Mean time per call.
    pub fn ns_per_iter(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.iterations.max(1) as f64
    }

    pub fn iters_per_sec(&self) -> f64 {
        let ns = self.ns_per_iter();
        if ns > 0.0 {
            1e9 / ns
        } else {
            0.0
        }
    }
}

/// Runs `epoch` (iteration count in, completed count and elapsed time out)
/// until a stable mean is available.
///
/// The count starts at 1 and grows tenfold until one epoch lasts at least
/// `min_time`. Epochs that read zero elapsed time keep growing the count, so
/// a coarse clock never yields an infinite rate. Further epochs then run at the
/// calibrated count until `epochs` are collected or `max_time` is used up.
pub fn measure<F>(config: &DriverConfig, mut epoch: F) -> Result<Measurement>
where
    F: FnMut(u64) -> (u64, Duration),
{
    let mut spent = Duration::ZERO;
    let mut iters = 1u64;

    let (done, elapsed) = loop {
        let (done, elapsed) = epoch(iters);
        spent += elapsed;
        if elapsed >= config.min_time && !elapsed.is_zero() {
            break (done, elapsed);
        }
        if iters >= config.max_iters || spent >= config.max_time {
            if elapsed.is_zero() {
                bail!("Clock did not advance after {} iterations", iters);
            }
            break (done, elapsed);
        }
        iters = iters
            .saturating_mul(CALIBRATION_GROWTH)
            .min(config.max_iters);
    };

    let mut total = Measurement {
        iterations: done,
        elapsed,
        epochs: 1,
    };
    while total.epochs < config.epochs && spent < config.max_time {
        let (done, elapsed) = epoch(iters);
        spent += elapsed;
        total.iterations += done;
        total.elapsed += elapsed;
        total.epochs += 1;
    }

    ensure!(total.iterations > 0, "Trial completed no iterations");
    Ok(total)
}

/// Executes registry entries one after another on the calling thread.
pub struct Driver<'a> {
    corpus: &'a Corpus,
    config: DriverConfig,
    logger: &'a Logger,
    progress: ProgressBar,
}

impl<'a> Driver<'a> {
    pub fn new(corpus: &'a Corpus, config: DriverConfig, logger: &'a Logger) -> Self {
        Self {
            corpus,
            config,
            logger,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports progress on stderr while running.
    pub fn with_progress(mut self) -> Result<Self> {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        self.progress = pb;
        Ok(self)
    }

    pub fn measure_trial(&self, spec: &TrialSpec) -> Result<Measurement> {
        measure(&self.config, |iters| {
            let start = Instant::now();
            let done = spec.run(self.corpus, iters);
            (done, start.elapsed())
        })
    }

    pub fn run(&self, registry: &Registry) -> Result<Vec<ReportLine>> {
        self.config.validate()?;
        self.progress.set_length(registry.trial_count() as u64);

        let mut lines = Vec::with_capacity(registry.len());
        for entry in registry.entries() {
            match entry {
                BenchmarkEntry::Separator => lines.push(ReportLine::Separator),
                BenchmarkEntry::Trial(spec) => {
                    let label = spec.label();
                    self.progress.set_message(label.clone());

                    let measurement = self.measure_trial(spec)?;
                    self.logger.log(&format!(
                        "Measured {}: {} iterations in {} epochs, {:.3} ns/iter",
                        label,
                        measurement.iterations,
                        measurement.epochs,
                        measurement.ns_per_iter()
                    ))?;

                    lines.push(ReportLine::Row(ReportRow { label, measurement }));
                    self.progress.inc(1);
                }
            }
        }

        self.progress.finish_and_clear();
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashers::HashAlgorithm;
    use crate::sweep::SweepSize;

    fn config(min_ns: u64, max_ms: u64, epochs: u32) -> DriverConfig {
        DriverConfig {
            min_time: Duration::from_nanos(min_ns),
            max_time: Duration::from_millis(max_ms),
            epochs,
            max_iters: 1 << 32,
        }
    }

    #[test]
    fn test_calibration_grows_tenfold() {
        let mut requested = Vec::new();
        // 1ns per iteration on a fake clock.
        let m = measure(&config(5_000, 1_000, 1), |iters| {
            requested.push(iters);
            (iters, Duration::from_nanos(iters))
        })
        .unwrap();

        assert_eq!(requested, [1, 10, 100, 1_000, 10_000]);
        assert_eq!(m.iterations, 10_000);
        assert_eq!(m.epochs, 1);
        assert_eq!(m.ns_per_iter(), 1.0);
        assert_eq!(m.iters_per_sec(), 1e9);
    }

    #[test]
    fn test_zero_elapsed_is_recalibrated() {
        let mut requested = Vec::new();
        // Clock only ticks once an epoch runs 1000+ iterations.
        let m = measure(&config(1_000, 1_000, 1), |iters| {
            requested.push(iters);
            let elapsed = if iters < 1_000 { 0 } else { iters * 2 };
            (iters, Duration::from_nanos(elapsed))
        })
        .unwrap();

        assert_eq!(requested, [1, 10, 100, 1_000]);
        assert_eq!(m.ns_per_iter(), 2.0);
        assert!(m.iters_per_sec().is_finite());
    }

    #[test]
    fn test_stopped_clock_is_an_error() {
        let cfg = DriverConfig {
            max_iters: 1_000,
            ..config(1_000, 1_000, 1)
        };
        let err = measure(&cfg, |iters| (iters, Duration::ZERO)).unwrap_err();
        assert!(err.to_string().contains("Clock did not advance"));
    }

    #[test]
    fn test_zero_min_time_still_needs_a_ticking_clock() {
        let cfg = DriverConfig {
            min_time: Duration::ZERO,
            max_iters: 1_000,
            ..DriverConfig::default()
        };
        let err = measure(&cfg, |iters| (iters, Duration::ZERO)).unwrap_err();
        assert!(err.to_string().contains("Clock did not advance"));

        let mut requested = Vec::new();
        let m = measure(&DriverConfig { epochs: 1, ..cfg }, |iters| {
            requested.push(iters);
            let elapsed = if iters < 100 { 0 } else { iters };
            (iters, Duration::from_nanos(elapsed))
        })
        .unwrap();
        assert_eq!(requested, [1, 10, 100]);
        assert_eq!(m.ns_per_iter(), 1.0);
        assert!(m.iters_per_sec() > 0.0);
    }

    #[test]
    fn test_mean_over_epochs() {
        let mut calls = 0;
        let m = measure(&config(100, 1_000, 4), |iters| {
            calls += 1;
            // Alternate 1ns and 3ns per iteration.
            let per = if calls % 2 == 0 { 3 } else { 1 };
            (iters, Duration::from_nanos(iters * per))
        })
        .unwrap();

        // Calibration: 1, 10, 100 iterations (third call is the first kept epoch).
        assert_eq!(m.epochs, 4);
        assert_eq!(m.iterations, 400);
        assert_eq!(m.elapsed, Duration::from_nanos(100 + 300 + 100 + 300));
        assert_eq!(m.ns_per_iter(), 2.0);
    }

    #[test]
    fn test_time_budget_caps_epochs() {
        let m = measure(&config(1_000_000, 10, 1_000), |iters| {
            (iters, Duration::from_nanos(iters * 1_000))
        })
        .unwrap();
        // 1000 iterations per epoch at 1ms each; 10ms budget.
        assert!(m.epochs < 1_000);
        assert!(m.elapsed <= Duration::from_millis(11));
    }

    #[test]
    fn test_iteration_ceiling() {
        let cfg = DriverConfig {
            max_iters: 50,
            ..config(1_000_000, 1_000, 1)
        };
        let mut requested = Vec::new();
        let m = measure(&cfg, |iters| {
            requested.push(iters);
            (iters, Duration::from_nanos(iters))
        })
        .unwrap();
        assert_eq!(requested, [1, 10, 50]);
        assert_eq!(m.iterations, 50);
    }

    #[test]
    fn test_validate() {
        assert!(DriverConfig::default().validate().is_ok());
        let zero_epochs = DriverConfig {
            epochs: 0,
            ..DriverConfig::default()
        };
        assert!(zero_epochs.validate().is_err());
        let no_budget = DriverConfig {
            max_time: Duration::ZERO,
            ..DriverConfig::default()
        };
        assert!(no_budget.validate().is_err());
    }

    #[test]
    fn test_run_emits_rows_in_order() {
        let corpus = Corpus::generate(1, 1 << 15);
        let logger = Logger::disabled();
        let mut registry = Registry::new();
        for size in [SweepSize::Linear(3), SweepSize::PowerOfTwo(4)] {
            registry.push_trial(TrialSpec {
                algorithm: HashAlgorithm::MurmurHash,
                size,
            });
        }
        registry.push_separator();

        let cfg = DriverConfig {
            min_time: Duration::from_micros(10),
            max_time: Duration::from_millis(5),
            epochs: 3,
            max_iters: 1 << 24,
        };
        let lines = Driver::new(&corpus, cfg, &logger).run(&registry).unwrap();

        assert_eq!(lines.len(), 3);
        let labels: Vec<&str> = lines
            .iter()
            .filter_map(|l| match l {
                ReportLine::Row(row) => Some(row.label.as_str()),
                ReportLine::Separator => None,
            })
            .collect();
        assert_eq!(labels, ["MurmurHash: k=3", "MurmurHash: k=2^4"]);
        assert_eq!(lines[2], ReportLine::Separator);
        for line in &lines[..2] {
            if let ReportLine::Row(row) = line {
                assert!(row.measurement.iterations > 0);
                assert!(row.measurement.ns_per_iter() > 0.0);
            }
        }
    }
}
