//! Deterministic input data shared by every trial.

use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const CORPUS_SEED: u64 = 1729;
pub const CORPUS_SIZE: usize = 1 << 20; // 1MiB, fits in cache

/// Number of leading bytes hex-encoded by [`Corpus::fingerprint`].
const FINGERPRINT_LEN: usize = 16;

/// Immutable byte buffer generated once at startup and borrowed by every trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    seed: u64,
    data: Vec<u8>,
}

impl Corpus {
    /// Draws `size` bytes uniformly from `[0, 255]` using a ChaCha stream seeded with `seed`.
    ///
    /// ChaCha output is fixed by its algorithm rather than by the `rand` version or
    /// the platform, so the same `(seed, size)` always yields the same bytes. A
    /// shorter corpus is a prefix of a longer one with the same seed.
    pub fn generate(seed: u64, size: usize) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let dist = Uniform::new_inclusive(0u8, 255);
        let data = rng.sample_iter(dist).take(size).collect();
        Self { seed, data }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Hex encoding of the first few bytes, used to check two runs hashed the same data.
    pub fn fingerprint(&self) -> String {
        let end = self.data.len().min(FINGERPRINT_LEN);
        hex::encode(&self.data[..end])
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::generate(CORPUS_SEED, CORPUS_SIZE)
    }
}
