// One benchmark trial: allocate, fill, time the kernel, hand back results.

use daxpy::error::Result;
use daxpy::{
    Measurement, RandomFill, SchedulingMode, SchedulingPolicy, WorkDistribution, daxpy, timer,
};
use ndarray::Array1;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Validated values for a trial that will run the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParameters {
    pub mode: SchedulingMode,
    pub threads: usize,
    pub length: usize,
}

#[derive(Debug)]
pub struct TrialOutcome {
    pub measurement: Measurement,
    pub distribution: WorkDistribution,
    pub y: Array1<f64>,
}

/// Builds the worker team for one trial. Asking for more threads than the
/// machine has is allowed.
pub fn worker_team(threads: usize) -> Result<ThreadPool> {
    let available = num_cpus::get();
    if threads > available {
        log::warn!(
            "{} threads requested on {} logical cpus; workers will be oversubscribed",
            threads,
            available
        );
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("daxpy-worker-{i}"))
        .build()?;
    Ok(pool)
}

/// Runs one trial. Only the kernel call sits inside the timing bracket;
/// team setup, allocation and fills happen before it.
pub fn run_trial<S: RandomFill>(
    params: &RunParameters,
    source: &mut S,
    chunk_size: usize,
) -> Result<TrialOutcome> {
    let pool = worker_team(params.threads)?;
    let policy = SchedulingPolicy::for_mode(params.mode, chunk_size);

    // heap allocation; exhaustion is not guarded against
    let mut x = Array1::<f64>::zeros(params.length);
    let mut y = Array1::<f64>::zeros(params.length);

    source.fill(x.view_mut(), &pool);
    source.fill(y.view_mut(), &pool);
    let a = source.scalar();

    log::debug!("running {:?} with a = {}", policy, a);

    let (distribution, measurement) =
        timer::time(|| daxpy(x.view(), y.view_mut(), a, policy, &pool))?;

    log::debug!(
        "{} units over {} of {} workers: {:?}",
        distribution.total_units(),
        distribution.active_workers(),
        params.threads,
        distribution.units_per_worker
    );

    Ok(TrialOutcome {
        measurement,
        distribution,
        y,
    })
}
