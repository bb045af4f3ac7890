#[cfg(test)]
mod tests;

pub mod error;
pub mod fill;
pub mod schedule;
pub mod timer;

// Home of the DAXPY kernel, y = y + a * x, under both scheduling policies.

pub use error::BenchError;
pub use fill::{RandomFill, SeededStreams};
pub use schedule::{DEFAULT_CHUNK_SIZE, SchedulingMode, SchedulingPolicy};
pub use timer::{Measurement, Stopwatch};

use ndarray::{ArrayView1, ArrayViewMut1, Axis, Zip, s};
use rayon::ThreadPool;
use std::ops::Range;
use std::sync::{Mutex, PoisonError};

/// How much work each member of the team ended up doing during one parallel
/// loop. Indexed by worker; a unit is a block (static) or a chunk (dynamic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDistribution {
    pub units_per_worker: Vec<usize>,
}

impl WorkDistribution {
    pub fn total_units(&self) -> usize {
        self.units_per_worker.iter().sum()
    }

    /// Workers that processed at least one unit.
    pub fn active_workers(&self) -> usize {
        self.units_per_worker.iter().filter(|&&u| u > 0).count()
    }
}

/// Runs DAXPY on `pool` under the given policy. The team size is the number
/// of threads in the pool.
///
/// __Arguments:__
///
/// + `x` - input vector, left untouched
///
/// + `y` - accumulator, overwritten with `y + a * x`
///
/// + `a` - the scalar
///
/// + `policy` - how index positions are distributed across the team
///
/// + `pool` - Rayon thread pool whose workers form the team
///
pub fn daxpy(
    x: ArrayView1<'_, f64>,
    y: ArrayViewMut1<'_, f64>,
    a: f64,
    policy: SchedulingPolicy,
    pool: &ThreadPool,
) -> WorkDistribution {
    match policy {
        SchedulingPolicy::StaticBlocks => daxpy_static(x, y, a, pool),
        SchedulingPolicy::DynamicChunks { chunk_size } => {
            daxpy_dynamic(x, y, a, chunk_size, pool)
        }
    }
}

/// Static policy: the index range is cut into one contiguous block per
/// worker before the loop starts, and worker `i` processes block `i`.
pub fn daxpy_static(
    x: ArrayView1<'_, f64>,
    y: ArrayViewMut1<'_, f64>,
    a: f64,
    pool: &ThreadPool,
) -> WorkDistribution {
    assert_eq!(x.len(), y.len(), "x and y must have the same length");

    let bounds = schedule::static_block_bounds(y.len(), pool.current_num_threads());
    let slots = into_slots(split_blocks(y, &bounds));

    let units_per_worker = pool.broadcast(|ctx| {
        let i = ctx.index();
        match take_slot(&slots[i]) {
            Some(block) if !block.is_empty() => {
                axpy_block(x.slice(s![bounds[i].clone()]), block, a);
                1
            }
            _ => 0,
        }
    });

    WorkDistribution { units_per_worker }
}

/// Dynamic policy: `chunk_size` consecutive indices per chunk, handed out
/// from a shared queue. A worker goes back to the queue after each chunk and
/// stops once the queue is empty. The lock covers only the queue.
pub fn daxpy_dynamic(
    x: ArrayView1<'_, f64>,
    mut y: ArrayViewMut1<'_, f64>,
    a: f64,
    chunk_size: usize,
    pool: &ThreadPool,
) -> WorkDistribution {
    assert_eq!(x.len(), y.len(), "x and y must have the same length");
    assert!(chunk_size > 0, "chunk size must be positive");

    let queue = Mutex::new(y.axis_chunks_iter_mut(Axis(0), chunk_size).enumerate());

    let units_per_worker = pool.broadcast(|_| {
        let mut taken = 0;
        loop {
            let next = queue.lock().unwrap_or_else(PoisonError::into_inner).next();
            let Some((i, chunk)) = next else {
                break;
            };

            let start = i * chunk_size;
            axpy_block(x.slice(s![start..start + chunk.len()]), chunk, a);
            taken += 1;
        }
        taken
    });

    WorkDistribution { units_per_worker }
}

/// Single-threaded reference: `y[i] = y[i] + x[i] * a` in index order.
pub fn daxpy_sequential(x: ArrayView1<'_, f64>, y: ArrayViewMut1<'_, f64>, a: f64) {
    assert_eq!(x.len(), y.len(), "x and y must have the same length");
    axpy_block(x, y, a);
}

fn axpy_block(x: ArrayView1<'_, f64>, y: ArrayViewMut1<'_, f64>, a: f64) {
    Zip::from(y).and(x).for_each(|y, &x| *y = *y + x * a);
}

// helpers shared with the vector initializer

/// Cuts a view into consecutive disjoint blocks with the given bounds, which
/// must be contiguous and start at 0.
pub(crate) fn split_blocks<'a>(
    mut view: ArrayViewMut1<'a, f64>,
    bounds: &[Range<usize>],
) -> Vec<ArrayViewMut1<'a, f64>> {
    let mut blocks = Vec::with_capacity(bounds.len());
    for block in bounds {
        let (head, tail) = view.split_at(Axis(0), block.len());
        blocks.push(head);
        view = tail;
    }
    blocks
}

/// One slot per worker; each worker takes exactly its own block out.
pub(crate) type Slot<'a> = Mutex<Option<ArrayViewMut1<'a, f64>>>;

pub(crate) fn into_slots(blocks: Vec<ArrayViewMut1<'_, f64>>) -> Vec<Slot<'_>> {
    blocks.into_iter().map(|b| Mutex::new(Some(b))).collect()
}

pub(crate) fn take_slot<'a>(slot: &Slot<'a>) -> Option<ArrayViewMut1<'a, f64>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}
