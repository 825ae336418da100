//! Reads a range-sum command stream from the file named by the first
//! argument, or from stdin, and prints the answers to stdout.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;
use summing_splay_tree::driver::{self, DriverConfig, DriverError};

fn run_with_args() -> Result<(), DriverError> {
    let config = DriverConfig::default();
    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());

    match env::args_os().nth(1) {
        Some(path) => driver::run(config, BufReader::new(File::open(path)?), output),
        None => driver::run(config, io::stdin().lock(), output),
    }
}

fn main() -> ExitCode {
    match run_with_args() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("range_sums: {}", e);
            ExitCode::FAILURE
        }
    }
}
