//! Benchmark configuration
use crate::permutation::PermutationKind;

/// Working set sized to stay within L1 (24 KiB)
pub const DEFAULT_L1_SIZE_KB: usize = 24;
/// Working set sized to stay within L2 (2400 KiB, fits in a 4 MiB L2)
pub const DEFAULT_L2_SIZE_KB: usize = 2400;
/// Working set sized to exceed cache, forcing RAM access (24000 KiB)
pub const DEFAULT_MAIN_MEM_SIZE_KB: usize = 24000;
/// Dependent loads per measurement, enough to amortize timer overhead
pub const DEFAULT_ITERATIONS: usize = 10_000_000;

/// Tunable parameters of a benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Working set sized to stay within L1
    pub l1_size_kb: usize,
    /// Working set sized to stay within L2
    pub l2_size_kb: usize,
    /// Working set sized to exceed cache, forcing RAM access
    pub main_mem_size_kb: usize,
    /// Number of chase steps timed per call
    pub iterations: usize,
    /// Fixed seed for the chain shuffle; `None` seeds every build from OS entropy
    pub seed: Option<u64>,
    /// Ordering used to link the chain
    pub permutation: PermutationKind,
    /// Walk the chain once, untimed, before measuring
    pub warmup: bool,
    /// CPU core to pin the measuring thread to
    pub cpu_core: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            l1_size_kb: DEFAULT_L1_SIZE_KB,
            l2_size_kb: DEFAULT_L2_SIZE_KB,
            main_mem_size_kb: DEFAULT_MAIN_MEM_SIZE_KB,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            permutation: PermutationKind::Random,
            warmup: false,
            cpu_core: None,
        }
    }
}
