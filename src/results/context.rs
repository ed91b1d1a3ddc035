//! Run-scoped result aggregation
//!
//! A `RunContext` collects the outcomes of one sequential test run: the
//! harness feeds it scenario boundaries and step outcomes, and at the end of
//! the run the accumulated map is turned into submission records (and
//! discarded). The passed-step counter is scenario-scoped and consumed one
//! step at a time while recording, so a step's recorded status depends on
//! how many passes are still unspent when its turn comes.

use std::collections::HashMap;

use serde_json::Value;

use crate::common::{Error, Result};
use crate::rail::types::Status;

/// One executed step as seen by the harness
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Step text as it appears in the scenario source
    pub text: String,
    /// Harness pseudo-steps (before/after hooks) never produce results
    pub synthetic: bool,
}

impl StepRecord {
    /// A regular scenario step
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            synthetic: false,
        }
    }

    /// A harness pseudo-step, excluded from recording
    pub fn synthetic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            synthetic: true,
        }
    }
}

/// One accumulated result entry
#[derive(Debug, Clone)]
pub struct ResultEntry {
    key: String,
    statuses: Vec<Status>,
}

impl ResultEntry {
    /// The composite description: feature, scenario and step text
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Statuses observed for this description, in observation order
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }
}

/// Aggregated results of a single run
#[derive(Debug, Default)]
pub struct RunContext {
    entries: Vec<ResultEntry>,
    index: HashMap<String, usize>,
    /// Passing steps seen in the current scenario, not yet spent on records
    passed_steps: u32,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the scenario-scoped state; call when a scenario starts
    pub fn begin_scenario(&mut self) {
        self.passed_steps = 0;
    }

    /// Note one passing step of the current scenario
    pub fn step_passed(&mut self) {
        self.passed_steps += 1;
    }

    /// Unspent passing steps of the current scenario
    pub fn passed_steps(&self) -> u32 {
        self.passed_steps
    }

    /// Record the executed steps of a finished scenario
    ///
    /// Each non-synthetic step gets the description key
    /// `"{feature} {scenario} {step text}"`. Its status is Passed while the
    /// passed-step counter is above zero and Failed once the counter is
    /// spent; every recorded step spends one count. Steps are consumed in
    /// execution order, so a failure early in the scenario shifts the
    /// remaining counts left and can mark trailing steps Failed.
    pub fn record_scenario(&mut self, feature: &str, scenario: &str, steps: &[StepRecord]) {
        for step in steps.iter().filter(|step| !step.synthetic) {
            let key = format!("{feature} {scenario} {}", step.text)
                .trim_end()
                .to_string();
            let status = if self.passed_steps > 0 {
                Status::Passed
            } else {
                Status::Failed
            };
            self.record(key, status);
            self.passed_steps = self.passed_steps.saturating_sub(1);
        }
    }

    /// Record one status under a description key
    ///
    /// A repeated observation of the same key appends to its status list;
    /// a status already present for that key is not duplicated.
    pub fn record(&mut self, key: String, status: Status) {
        match self.index.get(&key).copied() {
            Some(at) => {
                let statuses = &mut self.entries[at].statuses;
                if !statuses.contains(&status) {
                    statuses.push(status);
                }
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(ResultEntry {
                    key,
                    statuses: vec![status],
                });
            }
        }
    }

    /// Accumulated entries in first-observation order
    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The results map as a JSON object, description -> status id list
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for entry in &self.entries {
            map.insert(
                entry.key.clone(),
                Value::Array(
                    entry
                        .statuses
                        .iter()
                        .map(|status| Value::from(status.id()))
                        .collect(),
                ),
            );
        }
        Value::Object(map)
    }

    /// Rebuild a context from the JSON object produced by [`to_json`]
    ///
    /// [`to_json`]: RunContext::to_json
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::ReportParse("expected a JSON object".to_string()))?;

        let mut context = Self::new();
        for (key, statuses) in object {
            let statuses = statuses.as_array().ok_or_else(|| {
                Error::ReportParse(format!("'{key}': expected an array of status ids"))
            })?;
            for status in statuses {
                let id = status.as_u64().ok_or_else(|| {
                    Error::ReportParse(format!("'{key}': status ids must be integers"))
                })?;
                let status = Status::from_id(id).ok_or_else(|| {
                    Error::ReportParse(format!("'{key}': unknown status id {id}"))
                })?;
                context.record(key.clone(), status);
            }
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_is_spent_across_steps_in_order() {
        let mut context = RunContext::new();
        context.begin_scenario();
        context.step_passed();
        context.step_passed();

        // Two passing steps, then one failing: the two counts cover the
        // first two records, the third finds the counter spent.
        context.record_scenario(
            "Login",
            "happy path",
            &[
                StepRecord::new("Given an account"),
                StepRecord::new("When the user signs in"),
                StepRecord::new("Then the dashboard loads"),
            ],
        );

        let entries = context.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].key(), "Login happy path Given an account");
        assert_eq!(entries[0].statuses(), &[Status::Passed]);
        assert_eq!(entries[1].statuses(), &[Status::Passed]);
        assert_eq!(entries[2].statuses(), &[Status::Failed]);
        assert_eq!(context.passed_steps(), 0);
    }

    #[test]
    fn test_synthetic_steps_produce_no_entries_and_spend_nothing() {
        let mut context = RunContext::new();
        context.begin_scenario();
        context.step_passed();

        context.record_scenario(
            "Login",
            "hooks",
            &[
                StepRecord::synthetic("Before hook"),
                StepRecord::new("Given an account"),
                StepRecord::synthetic("AfterStep hook"),
            ],
        );

        assert_eq!(context.len(), 1);
        assert_eq!(context.entries()[0].key(), "Login hooks Given an account");
        assert_eq!(context.entries()[0].statuses(), &[Status::Passed]);
    }

    #[test]
    fn test_scenario_start_resets_the_counter() {
        let mut context = RunContext::new();
        context.begin_scenario();
        context.step_passed();
        context.step_passed();

        context.begin_scenario();
        context.record_scenario("F", "s", &[StepRecord::new("step")]);

        assert_eq!(context.entries()[0].statuses(), &[Status::Failed]);
    }

    #[test]
    fn test_repeated_key_accumulates_statuses() {
        let mut context = RunContext::new();
        context.record("F s step".to_string(), Status::Failed);
        context.record("F s step".to_string(), Status::Passed);

        assert_eq!(context.len(), 1);
        assert_eq!(
            context.entries()[0].statuses(),
            &[Status::Failed, Status::Passed]
        );
    }

    #[test]
    fn test_repeated_status_is_not_duplicated() {
        let mut context = RunContext::new();
        context.record("F s step".to_string(), Status::Passed);
        context.record("F s step".to_string(), Status::Passed);

        assert_eq!(context.entries()[0].statuses(), &[Status::Passed]);
    }

    #[test]
    fn test_description_keys_are_right_trimmed() {
        let mut context = RunContext::new();
        context.begin_scenario();
        context.record_scenario("F", "s", &[StepRecord::new("step text \n")]);

        assert_eq!(context.entries()[0].key(), "F s step text");
    }

    #[test]
    fn test_json_round_trip() {
        let mut context = RunContext::new();
        context.record("F s one".to_string(), Status::Passed);
        context.record("F s two".to_string(), Status::Failed);
        context.record("F s two".to_string(), Status::Passed);

        let restored = RunContext::from_json(&context.to_json()).unwrap();
        assert_eq!(restored.len(), 2);
        let two = restored
            .entries()
            .iter()
            .find(|entry| entry.key() == "F s two")
            .unwrap();
        assert_eq!(two.statuses(), &[Status::Failed, Status::Passed]);
    }

    #[test]
    fn test_foreign_status_id_is_rejected() {
        let value = serde_json::json!({ "F s step": [2] });
        assert!(matches!(
            RunContext::from_json(&value),
            Err(Error::ReportParse(_))
        ));
    }
}
