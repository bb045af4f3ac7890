// Interactive DAXPY scheduling benchmark.

use clap::Parser;
use daxpy::SeededStreams;
use daxpy_bench::config::{SessionConfig, parse_chunk_size};
use daxpy_bench::console::Console;
use daxpy_bench::session::Session;
use std::io;

/// Times y = y + a * x under static or dynamic scheduling, one trial per
/// set of answers, until a vector length of -1 is entered.
#[derive(Parser)]
#[command(about, long_about = None)]
struct CliArgs {
    /// Seed for the input generator; taken from the clock if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Indices per chunk in dynamic mode.
    #[arg(long, default_value_t = daxpy::DEFAULT_CHUNK_SIZE, value_parser = parse_chunk_size)]
    chunk_size: usize,

    /// Print every element of y after each trial.
    #[arg(long, action)]
    show_result: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = CliArgs::parse();

    let config = SessionConfig::new(args.seed, args.chunk_size, args.show_result);
    log::info!(
        "seed {}, dynamic chunk size {}",
        config.seed,
        config.chunk_size
    );

    let source = SeededStreams::new(config.seed);
    let console = Console::new(io::stdin().lock(), io::stdout().lock());

    let mut session = Session::new(config, source, console);
    session.run_to_end().map_err(|e| e.to_string())
}
