// Dual-clock timing bracket: processor time and monotonic wall time are
// sampled independently and reported independently.

use crate::error::{BenchError, Result};
use std::io;

#[cfg(target_os = "linux")]
const WALL_CLOCK: libc::clockid_t = libc::CLOCK_MONOTONIC_RAW;
#[cfg(not(target_os = "linux"))]
const WALL_CLOCK: libc::clockid_t = libc::CLOCK_MONOTONIC;

/// A raw reading of the monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: i64,
}

impl Timestamp {
    /// Seconds component times 1000 plus nanoseconds component / 1e6.
    pub fn as_millis(&self) -> f64 {
        (self.secs as f64) * 1000.0 + (self.nanos as f64) / 1_000_000.0
    }

    pub fn now() -> Result<Self> {
        // SAFETY: timespec is plain-old-data; all-zero bytes are a valid value.
        let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
        // SAFETY: clock_gettime only writes into the timespec we own.
        let ret = unsafe { libc::clock_gettime(WALL_CLOCK, &mut ts) };
        if ret != 0 {
            return Err(BenchError::Clock(io::Error::last_os_error()));
        }

        Ok(Self {
            secs: ts.tv_sec as i64,
            nanos: ts.tv_nsec as i64,
        })
    }
}

/// Cumulative user + system CPU time of the whole process, all threads
/// included, in seconds.
pub fn processor_seconds() -> Result<f64> {
    // SAFETY: rusage is plain-old-data; all-zero bytes are a valid value.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    // SAFETY: getrusage(RUSAGE_SELF, ..) writes into the struct we own.
    let ret = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if ret != 0 {
        return Err(BenchError::Clock(io::Error::last_os_error()));
    }

    let to_secs = |tv: libc::timeval| tv.tv_sec as f64 + tv.tv_usec as f64 / 1_000_000.0;
    Ok(to_secs(usage.ru_utime) + to_secs(usage.ru_stime))
}

/// Both clocks read back to back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSample {
    pub processor_seconds: f64,
    pub wall: Timestamp,
}

impl ClockSample {
    pub fn now() -> Result<Self> {
        let processor_seconds = processor_seconds()?;
        let wall = Timestamp::now()?;
        Ok(Self {
            processor_seconds,
            wall,
        })
    }
}

/// Elapsed durations for one timed region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub processor_time_seconds: f64,
    pub wall_time_millis: f64,
}

impl Measurement {
    /// Each timestamp is converted to milliseconds before subtracting.
    /// Results never go negative.
    pub fn between(start: &ClockSample, finish: &ClockSample) -> Self {
        let processor = finish.processor_seconds - start.processor_seconds;
        let wall = finish.wall.as_millis() - start.wall.as_millis();

        Self {
            processor_time_seconds: processor.max(0.0),
            wall_time_millis: wall.max(0.0),
        }
    }
}

/// Started immediately before the timed call, stopped immediately after.
#[derive(Debug)]
pub struct Stopwatch {
    start: ClockSample,
}

impl Stopwatch {
    pub fn start() -> Result<Self> {
        Ok(Self {
            start: ClockSample::now()?,
        })
    }

    pub fn stop(self) -> Result<Measurement> {
        let finish = ClockSample::now()?;
        Ok(Measurement::between(&self.start, &finish))
    }
}

/// Runs `f` inside a stopwatch bracket.
pub fn time<R>(f: impl FnOnce() -> R) -> Result<(R, Measurement)> {
    let stopwatch = Stopwatch::start()?;
    let result = f();
    let measurement = stopwatch.stop()?;
    Ok((result, measurement))
}
