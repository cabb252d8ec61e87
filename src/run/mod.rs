//! Drives one benchmark run end to end.
mod controller;
mod state;


pub use controller::{RunController, RunReport};
pub use state::RunState;
