// Pseudo-random input generation: the vector initializer and the scalar
// source, behind one capability trait.

use crate::schedule::static_block_bounds;
use crate::{into_slots, split_blocks, take_slot};
use ndarray::ArrayViewMut1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPool;
use std::time::{SystemTime, UNIX_EPOCH};

/// Largest value a fill draw can produce. Draws are whole numbers stored as
/// doubles; only their size matters to the benchmark.
pub const FILL_MAX: u32 = i32::MAX as u32;

/// Source of benchmark inputs.
pub trait RandomFill {
    /// One pseudo-random scalar; advances the source.
    fn scalar(&mut self) -> f64;

    /// Populates every element of `buf`, spreading the work over the
    /// workers of `pool`. No ordering or uniqueness guarantee on the values.
    fn fill(&mut self, buf: ArrayViewMut1<'_, f64>, pool: &ThreadPool);
}

/// A master generator seeded once per session. Each fill draws a base seed
/// from it and gives worker `i` its own stream seeded with `base + i`, so no
/// generator state is shared between workers.
#[derive(Debug, Clone)]
pub struct SeededStreams {
    seed: u64,
    master: StdRng,
}

impl SeededStreams {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            master: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomFill for SeededStreams {
    fn scalar(&mut self) -> f64 {
        draw(&mut self.master)
    }

    fn fill(&mut self, buf: ArrayViewMut1<'_, f64>, pool: &ThreadPool) {
        let base: u64 = self.master.r#gen();

        let bounds = static_block_bounds(buf.len(), pool.current_num_threads());
        log::trace!(
            "filling {} elements over {} streams from base seed {}",
            buf.len(),
            bounds.len(),
            base
        );
        let slots = into_slots(split_blocks(buf, &bounds));

        pool.broadcast(|ctx| {
            if let Some(mut block) = take_slot(&slots[ctx.index()]) {
                let mut rng = StdRng::seed_from_u64(base.wrapping_add(ctx.index() as u64));
                block.iter_mut().for_each(|v| *v = draw(&mut rng));
            }
        });
    }
}

fn draw(rng: &mut StdRng) -> f64 {
    f64::from(rng.gen_range(0..=FILL_MAX))
}

/// Seed derived from the wall clock, for sessions started without one.
pub fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
