// Errors that end a benchmark session.

use thiserror::Error;

/// Failures the harness does not recover from. Every variant is fatal to the
/// process; input mistakes are handled by the console and never get here.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("unable to build worker team: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("clock read failed: {0}")]
    Clock(std::io::Error),

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
