//! Memory latency measurement via pointer chasing.
//!
//! A buffer is linked into one randomly ordered cycle of pointer-sized cells and then chased for
//! a fixed number of dependent loads. Three entry points size the buffer to stay in L1, stay in
//! L2, or spill to main memory, and report the average nanoseconds per access.
pub mod affinity;
pub mod bench;
pub mod chain;
pub mod chase;
pub mod config;
pub mod error;
pub mod permutation;

pub use bench::{
    BenchmarkRunner, WorkingSet, measure_large_working_set, measure_medium_working_set,
    measure_small_working_set,
};
pub use chain::{Chain, ChainBuilder};
pub use config::Config;
pub use error::BenchError;
pub use permutation::{PermutationKind, RandomPermutation};

/// Convert number of bytes to formatted string
pub fn format_size(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;

    let b = bytes as f64;
    if bytes >= GB {
        format!("{:.2} GiB", b / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MiB", b / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KiB", b / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn sizes_pick_largest_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(24 * 1024), "24.00 KiB");
        assert_eq!(format_size(2400 * 1024), "2.34 MiB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }
}
