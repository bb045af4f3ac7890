// Work-distribution policies for the parallel loops.

use std::ops::Range;

/// Chunk size used by the dynamic policy unless configured otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// What the operator asked for at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingMode {
    Static,
    Dynamic,
}

impl SchedulingMode {
    /// 0 selects static scheduling, anything else dynamic.
    pub fn from_code(code: i64) -> Self {
        if code == 0 { Self::Static } else { Self::Dynamic }
    }
}

/// How index positions are handed to the workers of a team.
///
/// + `StaticBlocks` - one contiguous block per worker, fixed at loop entry.
///
/// + `DynamicChunks` - fixed-size chunks pulled from a shared queue as
///   workers finish their previous chunk.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingPolicy {
    StaticBlocks,
    DynamicChunks { chunk_size: usize },
}

impl SchedulingPolicy {
    pub fn for_mode(mode: SchedulingMode, chunk_size: usize) -> Self {
        match mode {
            SchedulingMode::Static => Self::StaticBlocks,
            SchedulingMode::Dynamic => Self::DynamicChunks { chunk_size },
        }
    }

    pub fn mode(&self) -> SchedulingMode {
        match self {
            Self::StaticBlocks => SchedulingMode::Static,
            Self::DynamicChunks { .. } => SchedulingMode::Dynamic,
        }
    }
}

/// Splits `[0, n)` into `workers` contiguous ranges whose lengths differ by
/// at most one. The first `n % workers` ranges get the extra element.
pub fn static_block_bounds(n: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "a worker team needs at least one worker");

    let base = n / workers;
    let extra = n % workers;

    let mut start = 0;
    (0..workers)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let block = start..start + len;
            start += len;
            block
        })
        .collect()
}

/// Number of chunks the dynamic policy will queue for `n` indices.
pub fn dynamic_chunk_count(n: usize, chunk_size: usize) -> usize {
    n.div_ceil(chunk_size)
}
