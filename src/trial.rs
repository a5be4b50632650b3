//! Timed inner loop: hash sliding `k`-byte windows of the corpus.

use crate::corpus::Corpus;
use crate::hashers::Hasher64;
use std::hint::black_box;

/// Hashes `iters` windows of `k` bytes with `hasher`, returning `iters`.
///
/// Panics if `k` exceeds the corpus length: a truncated window would produce a
/// number for a size that was never measured.
#[inline]
pub fn run_trial<H: Hasher64>(hasher: &H, corpus: &Corpus, k: usize, iters: u64) -> u64 {
    run_windows(corpus, k, iters, |window| hasher.digest(window))
}

/// Walks the corpus one byte at a time, calling `f` on each `k`-byte window and
/// wrapping back to offset 0 before a window would run past the end.
///
/// Every result goes through [`black_box`] so the calls cannot be elided.
#[inline]
pub fn run_windows<F>(corpus: &Corpus, k: usize, iters: u64, mut f: F) -> u64
where
    F: FnMut(&[u8]) -> u64,
{
    let data = corpus.as_bytes();
    assert!(
        k <= data.len(),
        "window size {} exceeds corpus length {}",
        k,
        data.len()
    );

    let wrap = data.len() - k + 1;
    let mut pos = 0;
    for _ in 0..iters {
        if pos == wrap {
            pos = 0;
        }
        black_box(f(&data[pos..pos + k]));
        pos += 1;
    }
    iters
}
