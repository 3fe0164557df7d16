//! # Benchmark runner
//!
//! Ties chain construction and the timed chase together into a single latency figure: average
//! nanoseconds per dependent load for a working set of a given size. Each call allocates a fresh
//! chain, measures it and frees it again before returning, so calls are independent of each
//! other.
use crate::chain::ChainBuilder;
use crate::chase::{chase, warm_up};
use crate::config::Config;
use crate::error::BenchError;
use crate::format_size;
use log::{debug, info};
use std::fmt;

/// Cache tier a working set is sized for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingSet {
    /// Fits in L1
    Small,
    /// Fits in L2 but not L1
    Medium,
    /// Exceeds cache, hits main memory
    Large,
}

impl WorkingSet {
    pub const ALL: [WorkingSet; 3] = [WorkingSet::Small, WorkingSet::Medium, WorkingSet::Large];

    /// Size in KiB configured for this working set
    pub fn size_kb(self, config: &Config) -> usize {
        match self {
            WorkingSet::Small => config.l1_size_kb,
            WorkingSet::Medium => config.l2_size_kb,
            WorkingSet::Large => config.main_mem_size_kb,
        }
    }
}

impl fmt::Display for WorkingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkingSet::Small => write!(f, "L1"),
            WorkingSet::Medium => write!(f, "L2"),
            WorkingSet::Large => write!(f, "RAM"),
        }
    }
}

/// Runs latency measurements with a fixed [`Config`]
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner {
    config: Config,
}

impl BenchmarkRunner {
    pub fn new(config: Config) -> Self {
        BenchmarkRunner { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Average nanoseconds per access when chasing a `size_kb` KiB chain
    pub fn run_for_size(&self, size_kb: usize) -> Result<f64, BenchError> {
        let iterations = self.config.iterations;
        if iterations == 0 {
            return Err(BenchError::invalid("iteration count must be at least 1"));
        }
        if size_kb == 0 {
            return Err(BenchError::invalid("working set size must be at least 1 KiB"));
        }
        let size_bytes = size_kb
            .checked_mul(1024)
            .ok_or_else(|| BenchError::invalid(format!("{size_kb} KiB overflows the address space")))?;

        let chain = ChainBuilder::from_config(&self.config).build(size_bytes)?;
        if self.config.warmup {
            warm_up(&chain);
        }
        let result = chase(&chain, iterations);
        drop(chain);

        let avg_ns = result.elapsed.as_nanos() as f64 / iterations as f64;
        debug!(
            "{} chased {} times in {:?}: {:.3} ns/access",
            format_size(size_bytes as u64),
            iterations,
            result.elapsed,
            avg_ns
        );
        Ok(avg_ns)
    }

    /// Average latency for the working set sized by `level`
    pub fn measure(&self, level: WorkingSet) -> Result<f64, BenchError> {
        let avg_ns = self.run_for_size(level.size_kb(&self.config))?;
        info!("{level} latency: {avg_ns:.3} ns/access");
        Ok(avg_ns)
    }

    /// Latency with a working set sized to stay within L1
    pub fn measure_small_working_set(&self) -> Result<f64, BenchError> {
        self.measure(WorkingSet::Small)
    }

    /// Latency with a working set sized to stay within L2
    pub fn measure_medium_working_set(&self) -> Result<f64, BenchError> {
        self.measure(WorkingSet::Medium)
    }

    /// Latency with a working set that exceeds cache
    pub fn measure_large_working_set(&self) -> Result<f64, BenchError> {
        self.measure(WorkingSet::Large)
    }
}

/// L1-sized measurement with the default configuration
pub fn measure_small_working_set() -> Result<f64, BenchError> {
    BenchmarkRunner::default().measure_small_working_set()
}

/// L2-sized measurement with the default configuration
pub fn measure_medium_working_set() -> Result<f64, BenchError> {
    BenchmarkRunner::default().measure_medium_working_set()
}

/// Main-memory-sized measurement with the default configuration
pub fn measure_large_working_set() -> Result<f64, BenchError> {
    BenchmarkRunner::default().measure_large_working_set()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> Config {
        Config {
            l1_size_kb: 4,
            l2_size_kb: 64,
            main_mem_size_kb: 1024,
            iterations: 200_000,
            seed: Some(0xDEADBEEF),
            ..Config::default()
        }
    }

    #[test]
    fn reports_positive_latency() {
        let runner = BenchmarkRunner::new(quick_config());
        for level in WorkingSet::ALL {
            let avg_ns = runner.measure(level).unwrap();
            assert!(avg_ns.is_finite() && avg_ns > 0.0, "{level}: {avg_ns}");
        }
    }

    #[test]
    fn warmup_and_bit_reversal_still_measure() {
        let runner = BenchmarkRunner::new(Config {
            warmup: true,
            permutation: crate::permutation::PermutationKind::BitReversal,
            ..quick_config()
        });
        assert!(runner.measure_medium_working_set().unwrap() > 0.0);
    }

    #[test]
    fn default_small_working_set() {
        assert!(measure_small_working_set().unwrap() > 0.0);
    }

    #[test]
    fn zero_iterations_rejected() {
        let runner = BenchmarkRunner::new(Config {
            iterations: 0,
            ..quick_config()
        });
        assert!(matches!(
            runner.measure_small_working_set(),
            Err(BenchError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn degenerate_sizes_rejected() {
        let runner = BenchmarkRunner::new(quick_config());
        for size_kb in [0, usize::MAX] {
            assert!(matches!(
                runner.run_for_size(size_kb),
                Err(BenchError::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn sizes_follow_config() {
        let config = quick_config();
        assert_eq!(WorkingSet::Small.size_kb(&config), 4);
        assert_eq!(WorkingSet::Medium.size_kb(&config), 64);
        assert_eq!(WorkingSet::Large.size_kb(&config), 1024);
        assert_eq!(WorkingSet::Large.to_string(), "RAM");
    }
}
