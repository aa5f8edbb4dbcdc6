//! Dispatch job orchestration module.

mod runner;

pub use runner::JobRunner;
