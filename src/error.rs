use thiserror::Error;

/// Errors reported by chain construction and the benchmark runner.
///
/// Allocation failure is not represented here: a buffer that cannot be obtained aborts the
/// process, there is nothing useful a latency measurement can do to recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// A size or iteration count that cannot produce a meaningful measurement.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl BenchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BenchError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
