mod args;
mod config;
mod entry;
mod error;
mod http;
mod metrics;
mod pool;
mod report;
mod run;
mod system;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use error::AppError;

fn main() -> ExitCode {
    match entry::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Clap { source }) => {
            // clap formats its own usage errors; the exit code stays 1.
            drop(source.print());
            ExitCode::FAILURE
        }
        Err(err) if err.is_startup_error() => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Benchmark aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}
