use clap::Parser;
use std::time::Duration;

use super::defaults::DEFAULT_TOTAL_REQUESTS;
use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_u64};
use super::types::{OutputFormat, PositiveU64, RunMode};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "httpbench",
    version,
    about = "A modern HTTP benchmarking tool - a fixed pool of concurrent clients repeatedly requests one URL and reports success/failure counts and latency statistics."
)]
pub struct BenchArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: Option<String>,

    /// Number of concurrent clients (worker threads)
    #[arg(long, short = 'c', default_value = "1")]
    pub clients: usize,

    /// Benchmark duration in seconds (bounds the run only with --mode duration)
    #[arg(
        long = "time",
        short = 't',
        default_value = "30",
        value_parser = parse_positive_u64
    )]
    pub time: PositiveU64,

    /// Total number of requests to send in count mode
    #[arg(long, short = 'n', default_value_t = DEFAULT_TOTAL_REQUESTS)]
    pub requests: u64,

    /// Whether the run is bounded by request count or by --time
    #[arg(long, value_enum, default_value = "count", ignore_case = true)]
    pub mode: RunMode,

    /// Per-request read/write timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Summary output format
    #[arg(long = "output-format", value_enum, default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Path to config file (TOML/JSON).
    /// Defaults to ./httpbench.toml or ./httpbench.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by HTTPBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
