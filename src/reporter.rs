//! Run orchestration against TestRail
//!
//! Composes the resolution engine with the API client: creates runs scoped
//! to a section or the whole suite, turns an aggregated results map into
//! submission records, closes runs and manages milestones. Everything is a
//! sequence of single request/response exchanges; a structural error in the
//! section data aborts an operation before any write request goes out.

use std::collections::HashMap;

use chrono::Local;

use crate::common::Result;
use crate::rail::client::ApiClient;
use crate::rail::types::{CaseResult, NewRun, Status, TestResult, STATUS_UNTESTED};
use crate::resolve::{collect_inherited_cases, full_title, SectionTree};
use crate::results::context::RunContext;

/// Orchestrates one project/suite's runs on TestRail
pub struct Reporter {
    client: ApiClient,
    project_id: u64,
    suite_id: u64,
}

impl Reporter {
    pub fn new(client: ApiClient, project_id: u64, suite_id: u64) -> Self {
        Self {
            client,
            project_id,
            suite_id,
        }
    }

    /// The underlying API client
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Look up a section id by display name within this suite
    pub fn section_id_by_name(&self, name: &str) -> Result<u64> {
        self.client
            .section_id_by_name(self.project_id, self.suite_id, name)
    }

    /// Create a run covering a section subtree, or the whole suite
    ///
    /// With a section id the case set is that section's cases plus the cases
    /// of everything nested under it; without one, every case of the suite.
    /// The run is created with a fixed case list, never `include_all`.
    /// Returns the new run's id.
    pub fn create_run(&self, name: &str, section_id: Option<u64>) -> Result<u64> {
        let case_ids = match section_id {
            Some(section_id) => {
                let sections = self.client.get_sections(self.project_id, self.suite_id)?;
                let tree = SectionTree::build(sections)?;
                collect_inherited_cases(
                    &self.client,
                    &tree,
                    self.project_id,
                    self.suite_id,
                    section_id,
                )?
            }
            None => self
                .client
                .get_cases(self.project_id, self.suite_id, None)?
                .into_iter()
                .map(|case| case.id)
                .collect(),
        };

        tracing::info!(cases = case_ids.len(), name, "creating run");
        let run = self.client.add_run(
            self.project_id,
            &NewRun {
                suite_id: self.suite_id,
                name: name.to_string(),
                include_all: false,
                case_ids,
            },
        )?;
        Ok(run.id)
    }

    /// Submit an aggregated results map to an open run
    ///
    /// Result keys are matched against the full hierarchical titles of the
    /// suite's cases; each matched entry contributes one record per
    /// accumulated status. Keys without a matching case are logged and
    /// skipped. Returns the number of records submitted.
    pub fn submit_results(&self, run_id: u64, context: &RunContext) -> Result<usize> {
        if context.is_empty() {
            tracing::info!(run_id, "no results to submit");
            return Ok(0);
        }

        let sections = self.client.get_sections(self.project_id, self.suite_id)?;
        let cases = self.client.get_cases(self.project_id, self.suite_id, None)?;

        let mut case_by_title: HashMap<String, u64> = HashMap::with_capacity(cases.len());
        for case in &cases {
            case_by_title.insert(full_title(case, &sections)?, case.id);
        }

        let mut records = Vec::new();
        for entry in context.entries() {
            match case_by_title.get(entry.key()) {
                Some(&case_id) => {
                    for &status in entry.statuses() {
                        records.push(CaseResult {
                            case_id,
                            status_id: status,
                        });
                    }
                }
                None => {
                    tracing::warn!(description = entry.key(), "no matching case, skipping");
                }
            }
        }

        if records.is_empty() {
            tracing::warn!(run_id, "none of the results matched a case");
            return Ok(0);
        }

        self.client.add_results_for_cases(run_id, &records)?;
        tracing::info!(run_id, records = records.len(), "results submitted");
        Ok(records.len())
    }

    /// Close a run
    pub fn close_run(&self, run_id: u64) -> Result<()> {
        self.client.close_run(run_id)?;
        Ok(())
    }

    /// Mark every still-untested test of a run as failed
    ///
    /// Fetches the untested tests first; when there are none, no write
    /// request is issued at all. Returns the number of tests marked.
    pub fn mark_untested_failed(&self, run_id: u64) -> Result<usize> {
        let tests = self.client.get_tests(run_id, Some(STATUS_UNTESTED))?;
        if tests.is_empty() {
            tracing::debug!(run_id, "no untested tests");
            return Ok(0);
        }

        let records: Vec<TestResult> = tests
            .iter()
            .map(|test| TestResult {
                test_id: test.id,
                status_id: Status::Failed,
            })
            .collect();
        self.client.add_results(run_id, &records)?;
        Ok(records.len())
    }

    /// Create a milestone; the name gets a creation timestamp suffix
    pub fn add_milestone(&self, name: &str) -> Result<u64> {
        let stamped = format!("{name}{}", Local::now().format("_%H/%M/%S_%d/%m/%Y"));
        let milestone = self.client.add_milestone(self.project_id, &stamped)?;
        Ok(milestone.id)
    }

    /// Mark a milestone completed
    pub fn close_milestone(&self, milestone_id: u64) -> Result<()> {
        self.client.update_milestone(milestone_id, true)?;
        Ok(())
    }
}
