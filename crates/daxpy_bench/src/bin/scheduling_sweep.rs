//! Runs one trial per (policy, thread count) pair on identical inputs and
//! logs the timings. Set RUST_LOG=info to see the results.

use clap::Parser;
use daxpy::fill::seed_from_clock;
use daxpy::{RandomFill, SchedulingPolicy, SeededStreams, daxpy, daxpy_sequential, timer};
use daxpy_bench::config::parse_chunk_size;
use daxpy_bench::trial::worker_team;
use ndarray::Array1;

#[derive(Parser)]
#[command(about, long_about = None)]
struct Args {
    /// Vector length.
    #[arg(long, default_value_t = 10_000_000)]
    length: usize,

    /// Comma-separated thread counts; defaults to powers of two up to the
    /// number of logical cpus.
    #[arg(long, value_delimiter = ',')]
    threads: Vec<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = daxpy::DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,
}

fn default_thread_counts() -> Vec<usize> {
    let cpus = num_cpus::get();
    let mut counts: Vec<usize> = std::iter::successors(Some(1_usize), |t| Some(t * 2))
        .take_while(|&t| t < cpus)
        .collect();
    counts.push(cpus);
    counts
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let threads = if args.threads.is_empty() {
        default_thread_counts()
    } else {
        args.threads
    };
    if threads.contains(&0) {
        return Err("thread counts must be at least 1".to_string());
    }

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    log::info!("n = {}, seed {}, threads {:?}", args.length, seed, threads);

    // inputs are generated once so every sample sees the same data
    let setup = worker_team(num_cpus::get()).map_err(|e| e.to_string())?;
    let mut source = SeededStreams::new(seed);
    let mut x = Array1::<f64>::zeros(args.length);
    let mut y = Array1::<f64>::zeros(args.length);
    source.fill(x.view_mut(), &setup);
    source.fill(y.view_mut(), &setup);
    let a = source.scalar();

    let mut expected = y.clone();
    daxpy_sequential(x.view(), expected.view_mut(), a);

    let policies = [
        SchedulingPolicy::StaticBlocks,
        SchedulingPolicy::DynamicChunks {
            chunk_size: args.chunk_size,
        },
    ];

    for &t in &threads {
        let pool = worker_team(t).map_err(|e| e.to_string())?;

        for policy in policies {
            let mut y_run = y.clone();
            let (dist, m) = timer::time(|| daxpy(x.view(), y_run.view_mut(), a, policy, &pool))
                .map_err(|e| e.to_string())?;

            if y_run != expected {
                return Err(format!(
                    "{:?} with {} threads diverged from sequential",
                    policy, t
                ));
            }

            log::info!(
                "{:>7} threads {:>3}: processor {:>8.3}s  wall {:>10.3}ms  ({} units)",
                format!("{:?}", policy.mode()),
                t,
                m.processor_time_seconds,
                m.wall_time_millis,
                dist.total_units()
            );
        }
    }

    Ok(())
}
