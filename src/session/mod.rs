//! Worker sessions
//!
//! Per-worker command stream consumption and response output.

pub mod worker;

pub use worker::{run_worker, save_image};
