//! Result aggregation and report files

pub mod context;
pub mod report;

pub use context::{ResultEntry, RunContext, StepRecord};
pub use report::{load_report, write_report};
