pub mod corpus;
pub mod driver;
pub mod hashers;
pub mod registry;
pub mod report;
pub mod sweep;
pub mod trial;
pub mod utils;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use corpus::{Corpus, CORPUS_SEED, CORPUS_SIZE};
use driver::{Driver, DriverConfig};
use hashers::HashAlgorithm;
use registry::Registry;
use report::render;
use utils::{format_bytes, Logger};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Minimum duration of one measurement epoch, in microseconds
    #[arg(long, default_value_t = 100)]
    pub bm_min_usec: u64,

    /// Maximum time spent on a single benchmark entry, in seconds
    #[arg(long, default_value_t = 1.0)]
    pub bm_max_secs: f64,

    /// Maximum number of measurement epochs per entry
    #[arg(long, default_value_t = 1000)]
    pub bm_epochs: u32,

    /// Iteration ceiling for a single epoch during calibration
    #[arg(long, default_value_t = 1u64 << 32)]
    pub bm_max_iters: u64,

    /// Hash functions to benchmark (repeatable; defaults to all)
    #[arg(long, value_enum)]
    pub hash: Vec<HashAlgorithm>,

    /// Only run entries whose label contains this substring
    #[arg(long)]
    pub filter: Option<String>,

    /// Show speed relative to the first entry of each group
    #[arg(long)]
    pub relative: bool,

    /// Print benchmark labels and exit
    #[arg(long)]
    pub list: bool,

    /// Seed of the generated input corpus
    #[arg(long, default_value_t = CORPUS_SEED)]
    pub seed: u64,

    /// Size of the generated input corpus in bytes
    #[arg(long, default_value_t = CORPUS_SIZE)]
    pub corpus_size: usize,

    /// Audit log file path
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    pub fn driver_config(&self) -> Result<DriverConfig> {
        ensure!(
            self.bm_max_secs.is_finite() && self.bm_max_secs > 0.0,
            "--bm-max-secs must be a positive number, got {}",
            self.bm_max_secs
        );
        let max_time = Duration::try_from_secs_f64(self.bm_max_secs)
            .context("--bm-max-secs out of range")?;
        let config = DriverConfig {
            min_time: Duration::from_micros(self.bm_min_usec),
            max_time,
            epochs: self.bm_epochs,
            max_iters: self.bm_max_iters,
        };
        config.validate()?;
        Ok(config)
    }

    /// Selected algorithms in declaration order, all of them if none were given.
    pub fn algorithms(&self) -> Vec<HashAlgorithm> {
        HashAlgorithm::ALL
            .into_iter()
            .filter(|a| self.hash.is_empty() || self.hash.contains(a))
            .collect()
    }
}

pub fn run(args: Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&args, &mut out)
}

/// Builds the corpus and registry, times every entry and writes the report to `out`.
pub fn execute<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let config = args.driver_config()?;
    let corpus = Corpus::generate(args.seed, args.corpus_size);
    let registry =
        Registry::standard(&args.algorithms(), corpus.len())?.filtered(args.filter.as_deref());

    if args.list {
        for entry in registry.entries() {
            writeln!(out, "{}", entry.label())?;
        }
        return Ok(());
    }

    let logger = Logger::new(args.log.as_deref());
    logger.log(&format!(
        "Starting run: {} entries, corpus {} bytes (seed {}, prefix {})",
        registry.trial_count(),
        corpus.len(),
        corpus.seed(),
        corpus.fingerprint()
    ))?;

    let mut driver = Driver::new(&corpus, config, &logger);
    if !args.quiet {
        driver = driver.with_progress()?;
    }
    let lines = driver.run(&registry)?;

    let title = format!(
        "hashbench (corpus {}, seed {})",
        format_bytes(corpus.len() as u64),
        corpus.seed()
    );
    write!(out, "{}", render(&title, &lines, args.relative))?;
    out.flush()?;

    logger.log("Run completed.")?;
    Ok(())
}
