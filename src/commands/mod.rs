//! CLI command orchestration.

pub mod config;
mod create;
mod show;

pub use config::Config;
pub use create::{MAX_RATE_LIMIT_WAITS, create, run_create};
pub use show::{run_show, show};
