//! TestRail API data types
//!
//! These types mirror the JSON payloads of the TestRail API (v2).
//! See: https://support.testrail.com/hc/en-us/sections/7077185274644

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status id used to filter still-untested tests in `get_tests`
pub const STATUS_UNTESTED: u64 = 3;

/// Result status submitted to TestRail
///
/// Only these two statuses are ever recorded; the numeric ids are the
/// server's fixed status ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    /// The server-side status id
    pub fn id(self) -> u64 {
        match self {
            Status::Passed => 1,
            Status::Failed => 5,
        }
    }

    /// Map a server status id back to a recordable status
    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Status::Passed),
            5 => Some(Status::Failed),
            _ => None,
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.id())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = u64::deserialize(deserializer)?;
        Status::from_id(id)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown status id {id}")))
    }
}

// === Taxonomy ===

/// A node in a suite's section hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
    pub depth: u32,
}

/// A test case; belongs to exactly one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: u64,
    pub section_id: u64,
    pub title: String,
}

// === Runs, tests and milestones ===

/// A created test run
#[derive(Debug, Clone, Deserialize)]
pub struct Run {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Request body for `add_run`
#[derive(Debug, Clone, Serialize)]
pub struct NewRun {
    pub suite_id: u64,
    pub name: String,
    pub include_all: bool,
    pub case_ids: Vec<u64>,
}

/// A test instance inside a run
#[derive(Debug, Clone, Deserialize)]
pub struct Test {
    pub id: u64,
    #[serde(default)]
    pub case_id: u64,
    pub status_id: u64,
    #[serde(default)]
    pub title: String,
}

/// A milestone
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_completed: bool,
}

// === Result submission records ===

/// One result record for `add_results_for_cases`
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub case_id: u64,
    pub status_id: Status,
}

/// One result record for `add_results`
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub test_id: u64,
    pub status_id: Status,
}
