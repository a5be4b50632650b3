//! Uniform `&[u8] -> u64` adapters over the benchmarked hash functions.

pub mod murmur;
pub mod spooky;

use crate::corpus::Corpus;
use crate::trial::run_trial;
use clap::ValueEnum;
use std::fmt;
use std::hash::Hasher;

/// A stateless 64-bit hash function.
///
/// `digest` must be a pure function of its input: any seed is a constant, so
/// repeated calls on the same bytes return the same value.
pub trait Hasher64 {
    const NAME: &'static str;

    fn digest(&self, data: &[u8]) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpookyHashV2;

impl Hasher64 for SpookyHashV2 {
    const NAME: &'static str = "SpookyHashV2";

    #[inline]
    fn digest(&self, data: &[u8]) -> u64 {
        spooky::spooky_hash64(data, 0)
    }
}

/// 64-bit FNV-1a (xor, then multiply) from the `fnv` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv64;

impl Hasher64 for Fnv64 {
    const NAME: &'static str = "FNV64";

    #[inline]
    fn digest(&self, data: &[u8]) -> u64 {
        let mut hasher = fnv::FnvHasher::default();
        hasher.write(data);
        hasher.finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MurmurHash;

impl Hasher64 for MurmurHash {
    const NAME: &'static str = "MurmurHash";

    #[inline]
    fn digest(&self, data: &[u8]) -> u64 {
        murmur::murmur_hash64a(data, 0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RapidHash;

impl Hasher64 for RapidHash {
    const NAME: &'static str = "RapidHash";

    #[inline]
    fn digest(&self, data: &[u8]) -> u64 {
        rapidhash::rapidhash(data)
    }
}

/// Closed set of benchmarked algorithms, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum HashAlgorithm {
    #[value(name = "spooky")]
    SpookyHashV2,
    #[value(name = "fnv64")]
    Fnv64,
    #[value(name = "murmur")]
    MurmurHash,
    #[value(name = "rapid")]
    RapidHash,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::SpookyHashV2,
        HashAlgorithm::Fnv64,
        HashAlgorithm::MurmurHash,
        HashAlgorithm::RapidHash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::SpookyHashV2 => SpookyHashV2::NAME,
            HashAlgorithm::Fnv64 => Fnv64::NAME,
            HashAlgorithm::MurmurHash => MurmurHash::NAME,
            HashAlgorithm::RapidHash => RapidHash::NAME,
        }
    }

    pub fn digest(self, data: &[u8]) -> u64 {
        match self {
            HashAlgorithm::SpookyHashV2 => SpookyHashV2.digest(data),
            HashAlgorithm::Fnv64 => Fnv64.digest(data),
            HashAlgorithm::MurmurHash => MurmurHash.digest(data),
            HashAlgorithm::RapidHash => RapidHash.digest(data),
        }
    }

    /// Runs `iters` hashes of `k`-byte windows. Dispatch happens once, outside
    /// the timed loop, so each arm is a monomorphised loop.
    pub fn run_trial(self, corpus: &Corpus, k: usize, iters: u64) -> u64 {
        match self {
            HashAlgorithm::SpookyHashV2 => run_trial(&SpookyHashV2, corpus, k, iters),
            HashAlgorithm::Fnv64 => run_trial(&Fnv64, corpus, k, iters),
            HashAlgorithm::MurmurHash => run_trial(&MurmurHash, corpus, k, iters),
            HashAlgorithm::RapidHash => run_trial(&RapidHash, corpus, k, iters),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
