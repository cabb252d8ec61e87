mod app;
mod config;
mod pool;
mod run;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use pool::PoolError;
pub use run::RunError;
pub use validation::ValidationError;
