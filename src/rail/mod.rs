//! TestRail API surface
//!
//! `types` holds the JSON payload shapes, `client` the blocking API client.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{Case, Milestone, Section, Status, Test};
