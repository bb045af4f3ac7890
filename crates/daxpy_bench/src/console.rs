// Prompting and reporting on a text console.
//
// Input is read as whitespace-separated tokens, so all three values may be
// typed on one line. A bad token is reported and the same field is asked
// for again; the rest of that line is discarded.

use daxpy::Measurement;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// The three values asked for before every trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    Threads,
    Length,
}

impl Field {
    pub fn prompt(&self) -> &'static str {
        match self {
            Field::Mode => "Run in static or dynamic mode? 0 is static: ",
            Field::Threads => "Please input the number of threads: ",
            Field::Length => "Please input the size of the y and x vectors: ",
        }
    }

    /// Range check on an already parsed value.
    pub fn validate(&self, value: i64) -> Result<i64, InputError> {
        match self {
            Field::Mode => Ok(value),
            Field::Threads if value < 1 => Err(InputError::ThreadCount(value)),
            Field::Length if value < -1 => Err(InputError::VectorLength(value)),
            _ => Ok(value),
        }
    }

    pub fn parse(&self, token: &str) -> Result<i64, InputError> {
        let value = token
            .parse::<i64>()
            .map_err(|_| InputError::NotAnInteger(token.to_string()))?;
        self.validate(value)
    }
}

/// Rejected console input. Never fatal; the field is asked for again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),

    #[error("thread count must be at least 1, got {0}")]
    ThreadCount(i64),

    #[error("vector length must be -1 or at least 0, got {0}")]
    VectorLength(i64),
}

pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Asks for `field` until a valid value arrives. `None` means the input
    /// is exhausted.
    pub fn ask(&mut self, field: Field) -> io::Result<Option<i64>> {
        loop {
            writeln!(self.output, "{}", field.prompt())?;
            self.output.flush()?;

            let Some(token) = self.next_token()? else {
                return Ok(None);
            };

            match field.parse(&token) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    log::debug!("rejected {:?} input: {}", field, e);
                    self.pending.clear();
                    writeln!(self.output, "Invalid input: {}", e)?;
                }
            }
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    pub fn report(&mut self, measurement: &Measurement) -> io::Result<()> {
        write!(
            self.output,
            "Processor Time: {:.6}\nWall Time: {:.6}\n\n",
            measurement.processor_time_seconds, measurement.wall_time_millis
        )?;
        self.output.flush()
    }

    pub fn show_vector(&mut self, y: &[f64]) -> io::Result<()> {
        for (i, v) in y.iter().enumerate() {
            writeln!(self.output, "The value of the y[{}] element: {:.6}", i, v)?;
        }
        Ok(())
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn text(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn reads_tokens_across_and_within_lines() {
        let mut c = console("0 4\n\n1000\n");
        assert_eq!(c.ask(Field::Mode).unwrap(), Some(0));
        assert_eq!(c.ask(Field::Threads).unwrap(), Some(4));
        assert_eq!(c.ask(Field::Length).unwrap(), Some(1000));
        assert_eq!(c.ask(Field::Mode).unwrap(), None);
    }

    #[test]
    fn malformed_input_reprompts_same_field() {
        let mut c = console("abc junk\n3\n");
        assert_eq!(c.ask(Field::Threads).unwrap(), Some(3));

        let out = text(c);
        assert_eq!(out.matches(Field::Threads.prompt()).count(), 2);
        assert!(out.contains("Invalid input: expected an integer, got \"abc\""));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(Field::Threads.parse("0"), Err(InputError::ThreadCount(0)));
        assert_eq!(Field::Threads.parse("-2"), Err(InputError::ThreadCount(-2)));
        assert_eq!(Field::Length.parse("-2"), Err(InputError::VectorLength(-2)));
        assert_eq!(Field::Length.parse("-1"), Ok(-1));
        assert_eq!(Field::Length.parse("0"), Ok(0));
        assert_eq!(Field::Mode.parse("-5"), Ok(-5));
    }

    #[test]
    fn report_format() {
        let mut c = console("");
        c.report(&Measurement {
            processor_time_seconds: 0.5,
            wall_time_millis: 12.25,
        })
        .unwrap();
        assert_eq!(text(c), "Processor Time: 0.500000\nWall Time: 12.250000\n\n");
    }
}
