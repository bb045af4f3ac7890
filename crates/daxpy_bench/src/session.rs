// The read / run / report loop, as an explicit state machine.

use crate::config::SessionConfig;
use crate::console::{Console, Field};
use crate::trial::{RunParameters, run_trial};
use daxpy::error::Result;
use daxpy::{RandomFill, SchedulingMode};
use std::io::{BufRead, Write};

/// ```text
/// AwaitingParameters --(length >= 0)--> Running --(reported)--> AwaitingParameters
/// AwaitingParameters --(length == -1 or end of input)--> Terminated
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingParameters,
    Running(RunParameters),
    Terminated,
}

pub struct Session<S, R, W> {
    state: SessionState,
    config: SessionConfig,
    source: S,
    console: Console<R, W>,
    trials: usize,
}

impl<S: RandomFill, R: BufRead, W: Write> Session<S, R, W> {
    pub fn new(config: SessionConfig, source: S, console: Console<R, W>) -> Self {
        Self {
            state: SessionState::AwaitingParameters,
            config,
            source,
            console,
            trials: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Completed trials so far.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Makes one transition and returns the state entered.
    pub fn step(&mut self) -> Result<&SessionState> {
        let next = match self.state {
            SessionState::AwaitingParameters => match self.read_parameters()? {
                Some(params) => SessionState::Running(params),
                None => {
                    self.console.farewell()?;
                    SessionState::Terminated
                }
            },
            SessionState::Running(params) => {
                self.run_and_report(&params)?;
                SessionState::AwaitingParameters
            }
            SessionState::Terminated => SessionState::Terminated,
        };

        self.state = next;
        Ok(&self.state)
    }

    /// Steps until the session terminates.
    pub fn run_to_end(&mut self) -> Result<()> {
        while self.state != SessionState::Terminated {
            self.step()?;
        }
        log::info!("session ended after {} trial(s)", self.trials);
        Ok(())
    }

    /// All three values are always asked for; the length decides whether a
    /// trial runs. `None` ends the session.
    fn read_parameters(&mut self) -> Result<Option<RunParameters>> {
        let Some(mode) = self.console.ask(Field::Mode)? else {
            return Ok(None);
        };
        let Some(threads) = self.console.ask(Field::Threads)? else {
            return Ok(None);
        };
        let Some(length) = self.console.ask(Field::Length)? else {
            return Ok(None);
        };

        if length == -1 {
            return Ok(None);
        }

        // both validated non-negative by the console
        Ok(Some(RunParameters {
            mode: SchedulingMode::from_code(mode),
            threads: threads as usize,
            length: length as usize,
        }))
    }

    fn run_and_report(&mut self, params: &RunParameters) -> Result<()> {
        log::info!(
            "trial {}: {:?} mode, {} threads, n = {}",
            self.trials + 1,
            params.mode,
            params.threads,
            params.length
        );

        let outcome = run_trial(params, &mut self.source, self.config.chunk_size)?;

        if self.config.show_result {
            // arrays built by zeros() are always contiguous
            if let Some(y) = outcome.y.as_slice() {
                self.console.show_vector(y)?;
            }
        }
        self.console.report(&outcome.measurement)?;
        self.trials += 1;
        Ok(())
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
