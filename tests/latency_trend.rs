//! Latency should grow as the working set moves out of each cache level.
//!
//! Timing-dependent, so ignored by default: `cargo test --release -- --ignored`
use memchase::BenchmarkRunner;

/// Slack for timer jitter between neighbouring levels
const TOLERANCE: f64 = 1.10;
const TRIALS: usize = 5;

fn median(mut samples: Vec<f64>) -> f64 {
    samples.sort_by(f64::total_cmp);
    samples[samples.len() / 2]
}

#[test]
#[ignore = "timing dependent, run on quiet hardware"]
fn latency_increases_with_working_set() {
    let runner = BenchmarkRunner::default();
    let small = median((0..TRIALS).map(|_| runner.measure_small_working_set().unwrap()).collect());
    let medium = median((0..TRIALS).map(|_| runner.measure_medium_working_set().unwrap()).collect());
    let large = median((0..TRIALS).map(|_| runner.measure_large_working_set().unwrap()).collect());

    assert!(small <= medium * TOLERANCE, "L1 {small:.3} ns vs L2 {medium:.3} ns");
    assert!(medium <= large * TOLERANCE, "L2 {medium:.3} ns vs RAM {large:.3} ns");
}
