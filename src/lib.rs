//! caravan - TestRail reporting bridge for BDD test runs
//!
//! This library resolves which test cases belong to a section subtree of a
//! TestRail suite, reconstructs full hierarchical case titles, aggregates
//! per-scenario step outcomes, and submits runs, results and milestones
//! through the TestRail JSON API.

pub mod cli;
pub mod commands;
pub mod common;
pub mod rail;
pub mod reporter;
pub mod resolve;
pub mod results;
pub mod scaffold;

// Re-export the types a test harness integration needs
pub use common::{Error, Result};
pub use rail::{ApiClient, Status};
pub use reporter::Reporter;
pub use resolve::{full_title, SectionTree};
pub use results::{RunContext, StepRecord};
