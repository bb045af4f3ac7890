// Settings shared by the harness binaries.

use daxpy::DEFAULT_CHUNK_SIZE;
use daxpy::fill::seed_from_clock;

/// Per-session settings that do not change between trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u64,
    pub chunk_size: usize,
    pub show_result: bool,
}

impl SessionConfig {
    /// `seed` falls back to one taken from the wall clock.
    pub fn new(seed: Option<u64>, chunk_size: usize, show_result: bool) -> Self {
        Self {
            seed: seed.unwrap_or_else(seed_from_clock),
            chunk_size,
            show_result,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_CHUNK_SIZE, false)
    }
}

/// clap value parser for `--chunk-size`.
pub fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_parsing() {
        assert_eq!(parse_chunk_size("100"), Ok(100));
        assert!(parse_chunk_size("0").is_err());
        assert!(parse_chunk_size("-3").is_err());
        assert!(parse_chunk_size("ten").is_err());
    }

    #[test]
    fn explicit_seed_is_kept() {
        let config = SessionConfig::new(Some(99), 50, true);
        assert_eq!(config.seed, 99);
        assert_eq!(config.chunk_size, 50);
        assert!(config.show_result);
    }
}
