//! Timed pointer chase over a [`Chain`]
use crate::chain::Chain;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Outcome of one timed chase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseResult {
    /// Wall-clock time spent in the dependent-load loop
    pub elapsed: Duration,
    /// Cell the chase stopped on
    pub last: usize,
}

/// Follow `chain` for `count` steps starting at cell 0
pub fn chase(chain: &Chain, count: usize) -> ChaseResult {
    chase_from(chain, 0, count)
}

/// Follow `chain` for `count` steps starting at `start`.
///
/// Every load's address is the value of the previous load, so the CPU has to wait for each fetch
/// to land before it can issue the next one.
#[inline(never)]
pub fn chase_from(chain: &Chain, start: usize, count: usize) -> ChaseResult {
    assert!(start < chain.len(), "start cell {start} outside chain of {}", chain.len());
    let ptr = chain.cells().as_ptr();
    let mut idx = start;

    let start_time = Instant::now();
    for _ in 0..count {
        // SAFETY: `idx` starts in bounds and every cell of a `Chain` holds an index < len
        idx = unsafe { *ptr.add(idx) };
    }
    let elapsed = start_time.elapsed();

    // Prevent dead code elimination
    ChaseResult {
        elapsed,
        last: black_box(idx),
    }
}

/// Traverse the whole chain once, untimed, so the TLB and caches hold the working set
#[inline(never)]
pub fn warm_up(chain: &Chain) {
    let ptr = chain.cells().as_ptr();
    let mut idx = 0usize;
    for _ in 0..chain.len() {
        // SAFETY: see `chase_from`
        idx = unsafe { *ptr.add(idx) };
    }
    black_box(idx);
}
