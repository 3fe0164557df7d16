//! Every benchmark call frees the chain it allocated before returning.
use memchase::{BenchmarkRunner, Config};
use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Allocations at least this large are tracked; nothing else in the test gets near it
const TRACKED_BYTES: usize = 256 * 1024;

static TRACKED_ALLOCS: AtomicUsize = AtomicUsize::new(0);
static TRACKED_FREES: AtomicUsize = AtomicUsize::new(0);

struct CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.size() >= TRACKED_BYTES {
            TRACKED_ALLOCS.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if layout.size() >= TRACKED_BYTES {
            TRACKED_ALLOCS.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if layout.size() >= TRACKED_BYTES {
            TRACKED_FREES.fetch_add(1, Ordering::SeqCst);
        }
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

#[test]
fn chain_buffer_is_released_after_each_call() {
    let runner = BenchmarkRunner::new(Config {
        l1_size_kb: TRACKED_BYTES / 1024,
        l2_size_kb: 2 * TRACKED_BYTES / 1024,
        iterations: 10_000,
        ..Config::default()
    });

    for call in 0..3 {
        let allocs_before = TRACKED_ALLOCS.load(Ordering::SeqCst);
        let frees_before = TRACKED_FREES.load(Ordering::SeqCst);

        runner.measure_small_working_set().unwrap();
        runner.measure_medium_working_set().unwrap();

        let allocs = TRACKED_ALLOCS.load(Ordering::SeqCst) - allocs_before;
        let frees = TRACKED_FREES.load(Ordering::SeqCst) - frees_before;
        // at least the chain cells of both calls
        assert!(allocs >= 2, "call {call}: only {allocs} tracked allocations");
        assert_eq!(allocs, frees, "call {call}: {allocs} allocated, {frees} freed");
    }
}
