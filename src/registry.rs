//! Ordered list of benchmark entries, one per (hash function, size) pair.

use crate::corpus::Corpus;
use crate::hashers::HashAlgorithm;
use crate::sweep::{all_sizes, SweepSize};
use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSpec {
    pub algorithm: HashAlgorithm,
    pub size: SweepSize,
}

impl TrialSpec {
    /// e.g. `"FNV64: k=8"` or `"FNV64: k=2^3"`
    pub fn label(&self) -> String {
        format!("{}: {}", self.algorithm, self.size)
    }

    pub fn run(&self, corpus: &Corpus, iters: u64) -> u64 {
        self.algorithm.run_trial(corpus, self.size.len(), iters)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkEntry {
    Trial(TrialSpec),
    /// Draws a rule between groups; never timed.
    Separator,
}

impl BenchmarkEntry {
    pub fn label(&self) -> String {
        match self {
            BenchmarkEntry::Trial(spec) => spec.label(),
            BenchmarkEntry::Separator => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<BenchmarkEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// For each algorithm in order: every linear size, every power-of-two
    /// size, then a separator.
    ///
    /// Fails if any size is larger than `corpus_len`.
    pub fn standard(algorithms: &[HashAlgorithm], corpus_len: usize) -> Result<Self> {
        let sizes = all_sizes();
        if let Some(too_big) = sizes.iter().find(|s| s.len() > corpus_len) {
            bail!(
                "Sweep size {} ({} bytes) exceeds corpus length {}",
                too_big,
                too_big.len(),
                corpus_len
            );
        }

        let mut registry = Self::new();
        for &algorithm in algorithms {
            for &size in &sizes {
                registry.push_trial(TrialSpec { algorithm, size });
            }
            registry.push_separator();
        }
        Ok(registry)
    }

    /// Keeps only trials whose label contains `pattern`. A separator survives
    /// only if its group still has a trial.
    pub fn filtered(&self, pattern: Option<&str>) -> Self {
        let Some(pattern) = pattern else {
            return self.clone();
        };

        let mut registry = Self::new();
        let mut group_has_trial = false;
        for entry in &self.entries {
            match entry {
                BenchmarkEntry::Trial(spec) => {
                    if spec.label().contains(pattern) {
                        registry.push_trial(*spec);
                        group_has_trial = true;
                    }
                }
                BenchmarkEntry::Separator => {
                    if group_has_trial {
                        registry.push_separator();
                    }
                    group_has_trial = false;
                }
            }
        }
        registry
    }

    pub fn push_trial(&mut self, spec: TrialSpec) {
        self.entries.push(BenchmarkEntry::Trial(spec));
    }

    pub fn push_separator(&mut self) {
        self.entries.push(BenchmarkEntry::Separator);
    }

    pub fn entries(&self) -> &[BenchmarkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn trial_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, BenchmarkEntry::Trial(_)))
            .count()
    }

    pub fn separator_count(&self) -> usize {
        self.len() - self.trial_count()
    }
}
