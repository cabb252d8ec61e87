//! Core library for the `httpbench` CLI.
//!
//! A run drives a fixed-size pool of worker threads, each executing one
//! blocking GET per task against a single URL, and aggregates the outcomes
//! into success/failure counts and latency statistics. The primary
//! user-facing interface is the `httpbench` command-line application.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod pool;
pub mod report;
pub mod run;

#[cfg(test)]
mod test_support;
