//! Measuring-thread setup: CPU pinning and scheduling priority.
//!
//! Both are best effort. A thread that migrates between cores mid-chase starts over with cold
//! private caches, so pinning makes L1/L2 figures steadier, but a failure here only costs noise.
use log::{debug, warn};
use thread_priority::{ThreadPriority, set_current_thread_priority};

/// Pin the calling thread to `cpu_core` (if given) and raise it to maximum priority.
///
/// Returns whether the thread ended up pinned.
pub fn prepare_current_thread(cpu_core: Option<usize>) -> bool {
    let pinned = match cpu_core {
        Some(cpu_num) => {
            let core_num = core_affinity::CoreId { id: cpu_num };
            let pinned = core_affinity::set_for_current(core_num);
            if pinned {
                debug!("Measuring thread pinned to CPU core {cpu_num}");
            } else {
                warn!(
                    "Couldn't pin measuring thread to CPU core {cpu_num} (NOTE: this is expected on macOS)"
                );
            }
            pinned
        }
        None => false,
    };

    if set_current_thread_priority(ThreadPriority::Max).is_err() {
        warn!("Couldn't set measuring thread to maximum thread priority");
    }

    pinned
}
