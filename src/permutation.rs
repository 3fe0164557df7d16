//! # Permutation
//!
//! Index orderings used to lay out the chase chain. The default is an unbiased Fisher-Yates
//! shuffle, so consecutive hops land on unrelated cache lines and neither the stride nor the
//! spatial prefetcher can guess the next address. A bit-reversal ordering (OEIS A030109) is also
//! available as a structured, fully deterministic alternative.
use crate::error::BenchError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Ordering used to link the cells of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermutationKind {
    /// Uniformly random cycle
    #[default]
    Random,
    /// Bit-reversal sequence, cut down to the cell count
    BitReversal,
}

impl fmt::Display for PermutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermutationKind::Random => write!(f, "random"),
            PermutationKind::BitReversal => write!(f, "bit-reversal"),
        }
    }
}

impl FromStr for PermutationKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(PermutationKind::Random),
            "bit-reversal" | "bit_reversal" | "bitreversal" => Ok(PermutationKind::BitReversal),
            other => Err(BenchError::invalid(format!(
                "unknown permutation kind '{other}' (expected 'random' or 'bit-reversal')"
            ))),
        }
    }
}

/// Pseudo-random generator producing uniformly random permutations of `[0, n)`
pub struct RandomPermutation {
    rng: StdRng,
}

impl RandomPermutation {
    /// Engine seeded from the operating system's entropy source
    pub fn from_entropy() -> Self {
        RandomPermutation {
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed, for reproducible chains
    pub fn seeded(seed: u64) -> Self {
        RandomPermutation {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded engine if `seed` is given, entropy-seeded otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Return a number in the range `[0, upper_limit)`
    fn draw(&mut self, upper_limit: usize) -> usize {
        self.rng.gen_range(0..upper_limit)
    }

    /// Shuffle `[0, n)` in place: position `i` swaps with a uniform pick from `[i, n)`.
    pub fn generate(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        for i in 0..n.saturating_sub(1) {
            let j = i + self.draw(n - i);
            if i != j {
                indices.swap(i, j);
            }
        }
        indices
    }
}

/// Floor of the base-2 logarithm, with `log2(0) == 0`
pub fn log2(val: usize) -> u32 {
    if val == 0 { 0 } else { val.ilog2() }
}

/// Reverse the lowest `bits` bits of `val`
pub fn bit_reverse(mut val: usize, mut bits: u32) -> usize {
    let mut result = 0;
    while bits > 0 {
        result = (result << 1) | (val & 1);
        val >>= 1;
        bits -= 1;
    }
    result
}

/// Bit-reversal permutation of `[0, n)`.
///
/// Built over the next power of two, then shortened: every entry `>= n` is overwritten by
/// whatever currently sits at the end of the sequence, which is then dropped.
pub fn bit_reversal(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let bits = log2(n.next_power_of_two());
    let mut seq: Vec<usize> = (0..1usize << bits).map(|v| bit_reverse(v, bits)).collect();

    let mut index = 0;
    while seq.len() > n {
        while seq[index] < n {
            index += 1;
        }
        // an out-of-range entry always exists below len while len > n
        let last = seq.len() - 1;
        seq.swap(index, last);
        seq.pop();
    }
    seq
}
