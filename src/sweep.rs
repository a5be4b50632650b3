//! Input lengths exercised for every hash function.
//!
//! The linear sweep shows fixed per-call overhead at tiny sizes; the
//! power-of-two sweep shows per-byte throughput up to 32 KiB.

use std::fmt;

pub const LINEAR_MAX: usize = 15;
pub const POWER_OF_TWO_MAX_EXP: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepSize {
    Linear(usize),
    PowerOfTwo(u32),
}

impl SweepSize {
    /// Window length in bytes.
    pub fn len(self) -> usize {
        match self {
            SweepSize::Linear(k) => k,
            SweepSize::PowerOfTwo(exp) => 1usize << exp,
        }
    }
}

impl fmt::Display for SweepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepSize::Linear(k) => write!(f, "k={}", k),
            SweepSize::PowerOfTwo(exp) => write!(f, "k=2^{}", exp),
        }
    }
}

/// `1, 2, ..., 15`
pub fn linear_sizes() -> Vec<SweepSize> {
    (1..=LINEAR_MAX).map(SweepSize::Linear).collect()
}

/// `2^0, 2^1, ..., 2^15`
pub fn power_of_two_sizes() -> Vec<SweepSize> {
    (0..=POWER_OF_TWO_MAX_EXP).map(SweepSize::PowerOfTwo).collect()
}

/// Linear sweep followed by the power-of-two sweep.
pub fn all_sizes() -> Vec<SweepSize> {
    let mut sizes = linear_sizes();
    sizes.extend(power_of_two_sizes());
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_sizes() {
        let lens: Vec<usize> = linear_sizes().into_iter().map(SweepSize::len).collect();
        assert_eq!(lens, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_power_of_two_sizes() {
        let lens: Vec<usize> = power_of_two_sizes()
            .into_iter()
            .map(SweepSize::len)
            .collect();
        assert_eq!(
            lens,
            [1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SweepSize::Linear(7).to_string(), "k=7");
        assert_eq!(SweepSize::PowerOfTwo(10).to_string(), "k=2^10");
    }

    #[test]
    fn test_all_sizes_order() {
        let sizes = all_sizes();
        assert_eq!(sizes.len(), 31);
        assert_eq!(sizes[14], SweepSize::Linear(15));
        assert_eq!(sizes[15], SweepSize::PowerOfTwo(0));
        assert_eq!(sizes.iter().map(|s| s.len()).max(), Some(32768));
    }
}
