//! Cache and Memory Latency Measurement via Pointer Chasing
//!
//! Runs the L1, L2 and main-memory sized benchmarks `rounds` times, each level `repeats` times in
//! a row, and prints every raw ns/access figure.
use anyhow::Context;
use clap::Parser;
use log::info;
use memchase::config::{
    DEFAULT_ITERATIONS, DEFAULT_L1_SIZE_KB, DEFAULT_L2_SIZE_KB, DEFAULT_MAIN_MEM_SIZE_KB,
};
use memchase::{BenchmarkRunner, Config, PermutationKind, WorkingSet, affinity, format_size};

// use faster/smaller `mimalloc` allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Arguments
#[derive(Debug, Parser)]
#[command(about = "Measure L1, L2 and main memory latency by pointer chasing")]
struct Args {
    /// Working set (KiB) sized to stay within L1
    #[arg(long, env = "MEMCHASE_L1_SIZE_KB", default_value_t = DEFAULT_L1_SIZE_KB)]
    l1_size_kb: usize,

    /// Working set (KiB) sized to stay within L2
    #[arg(long, env = "MEMCHASE_L2_SIZE_KB", default_value_t = DEFAULT_L2_SIZE_KB)]
    l2_size_kb: usize,

    /// Working set (KiB) sized to exceed cache, forcing RAM access
    #[arg(long, env = "MEMCHASE_MAIN_MEM_SIZE_KB", default_value_t = DEFAULT_MAIN_MEM_SIZE_KB)]
    main_mem_size_kb: usize,

    /// Dependent loads timed per measurement
    #[arg(long, env = "MEMCHASE_ITERATIONS", default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Fixed shuffle seed (default: fresh OS entropy for every chain)
    #[arg(long, env = "MEMCHASE_SEED")]
    seed: Option<u64>,

    /// Chain ordering: `random` or `bit-reversal`
    #[arg(long, env = "MEMCHASE_PERMUTATION", default_value = "random")]
    permutation: PermutationKind,

    /// Walk each chain once before timing it
    #[arg(long)]
    warmup: bool,

    /// CPU core to pin the measuring thread to
    #[arg(long, env = "MEMCHASE_CPU_CORE")]
    cpu_core: Option<usize>,

    /// Number of passes over all three levels
    #[arg(long, default_value_t = 10)]
    rounds: usize,

    /// Measurements per level within a pass
    #[arg(long, default_value_t = 10)]
    repeats: usize,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            l1_size_kb: self.l1_size_kb,
            l2_size_kb: self.l2_size_kb,
            main_mem_size_kb: self.main_mem_size_kb,
            iterations: self.iterations,
            seed: self.seed,
            permutation: self.permutation,
            warmup: self.warmup,
            cpu_core: self.cpu_core,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let runner = BenchmarkRunner::new(args.config());
    let config = runner.config();

    affinity::prepare_current_thread(config.cpu_core);
    info!(
        "Chasing {} steps per measurement over {} chains ({} rounds x {} repeats)",
        config.iterations, config.permutation, args.rounds, args.repeats
    );

    for _ in 0..args.rounds {
        for level in WorkingSet::ALL {
            let size_bytes = level.size_kb(config) as u64 * 1024;
            println!(" Running {level} test ({})", format_size(size_bytes));
            for _ in 0..args.repeats {
                let avg_ns = runner
                    .run_for_size(level.size_kb(config))
                    .with_context(|| format!("{level} benchmark failed"))?;
                println!(" {avg_ns}");
            }
        }
    }

    info!("Latency measurement completed!");
    Ok(())
}
