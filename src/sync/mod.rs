//! Concurrency
//!
//! The mutual-exclusion gate serializing command execution.

pub mod gate;

pub use gate::CommandGate;
