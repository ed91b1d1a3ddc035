//! TestRail API client
//!
//! Thin blocking wrapper over the TestRail JSON API. Every call is a single
//! request/response exchange; nothing is cached or retried here, a failed
//! exchange propagates to the caller of the operation that issued it.

use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::common::{Error, Result};
use crate::resolve::CaseSource;

use super::types::*;

/// Client for a single TestRail installation
pub struct ApiClient {
    http: HttpClient,
    /// Fully-formed API prefix, `{base}/index.php?/api/v2/`
    url: String,
    user: String,
    password: String,
}

impl ApiClient {
    /// Create a client for the given base URL and credentials
    pub fn new(base_url: &str, user: &str, password: &str) -> Self {
        let mut url = base_url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str("index.php?/api/v2/");

        Self {
            http: HttpClient::new(),
            url,
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    /// Issue a GET request against the API
    pub fn send_get(&self, endpoint: &str) -> Result<Value> {
        self.exchange(Method::GET, endpoint, None)
    }

    /// Issue a POST request against the API
    pub fn send_post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.exchange(Method::POST, endpoint, Some(body))
    }

    fn exchange(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.url, endpoint);
        tracing::debug!(%method, endpoint, "TestRail request");

        let mut request = self
            .http
            .request(method, &url)
            .basic_auth(&self.user, Some(&self.password))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;
        tracing::debug!(status = status.as_u16(), body = %text, "TestRail response");

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(|e| e.as_str())
                        .map(|e| format!("\"{e}\""))
                })
                .unwrap_or_else(|| "no additional error message received".to_string());
            return Err(Error::transport(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    fn parse<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
        serde_json::from_value(value)
            .map_err(|e| Error::MalformedResponse(format!("failed to parse {what}: {e}")))
    }

    // === Sections and cases ===

    /// All sections of a suite, as the flat list the server keeps them in
    pub fn get_sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>> {
        let value = self.send_get(&format!("get_sections/{project_id}&suite_id={suite_id}"))?;
        Self::parse(value, "sections")
    }

    /// A single section by id
    pub fn get_section(&self, section_id: u64) -> Result<Section> {
        let value = self.send_get(&format!("get_section/{section_id}"))?;
        Self::parse(value, "section")
    }

    /// Cases of a suite, optionally narrowed to one section
    pub fn get_cases(
        &self,
        project_id: u64,
        suite_id: u64,
        section_id: Option<u64>,
    ) -> Result<Vec<Case>> {
        let mut endpoint = format!("get_cases/{project_id}&suite_id={suite_id}");
        if let Some(section_id) = section_id {
            endpoint.push_str(&format!("&section_id={section_id}"));
        }
        let value = self.send_get(&endpoint)?;
        Self::parse(value, "cases")
    }

    /// Ids of the cases directly inside one section
    pub fn case_ids_for_section(
        &self,
        project_id: u64,
        suite_id: u64,
        section_id: u64,
    ) -> Result<Vec<u64>> {
        Ok(self
            .get_cases(project_id, suite_id, Some(section_id))?
            .into_iter()
            .map(|case| case.id)
            .collect())
    }

    /// Look up a section id by its display name
    pub fn section_id_by_name(&self, project_id: u64, suite_id: u64, name: &str) -> Result<u64> {
        self.get_sections(project_id, suite_id)?
            .iter()
            .find(|section| section.name == name)
            .map(|section| section.id)
            .ok_or_else(|| Error::UnknownSectionName(name.to_string()))
    }

    // === Runs and results ===

    /// Create a run with a fixed case set
    pub fn add_run(&self, project_id: u64, run: &NewRun) -> Result<Run> {
        let value = self.send_post(&format!("add_run/{project_id}"), &serde_json::to_value(run)?)?;
        Self::parse(value, "run")
    }

    /// Submit results keyed by case id
    pub fn add_results_for_cases(&self, run_id: u64, results: &[CaseResult]) -> Result<Value> {
        self.send_post(
            &format!("add_results_for_cases/{run_id}"),
            &json!({ "results": results }),
        )
    }

    /// Submit one result for a single case
    pub fn add_result_for_case(
        &self,
        run_id: u64,
        case_id: u64,
        status: Status,
        comment: Option<&str>,
    ) -> Result<Value> {
        let mut body = json!({ "status_id": status });
        if let Some(comment) = comment {
            body["comment"] = json!(comment);
        }
        self.send_post(&format!("add_result_for_case/{run_id}/{case_id}"), &body)
    }

    /// Submit results keyed by test id
    pub fn add_results(&self, run_id: u64, results: &[TestResult]) -> Result<Value> {
        self.send_post(&format!("add_results/{run_id}"), &json!({ "results": results }))
    }

    /// Close a run; a closed run can no longer receive results
    pub fn close_run(&self, run_id: u64) -> Result<Value> {
        self.send_post(&format!("close_run/{run_id}"), &json!({}))
    }

    /// Tests of a run, optionally filtered by status id
    pub fn get_tests(&self, run_id: u64, status_id: Option<u64>) -> Result<Vec<Test>> {
        let mut endpoint = format!("get_tests/{run_id}");
        if let Some(status_id) = status_id {
            endpoint.push_str(&format!("&status_id={status_id}"));
        }
        let value = self.send_get(&endpoint)?;
        Self::parse(value, "tests")
    }

    // === Milestones ===

    /// Create a milestone with the given name
    pub fn add_milestone(&self, project_id: u64, name: &str) -> Result<Milestone> {
        let value = self.send_post(&format!("add_milestone/{project_id}"), &json!({ "name": name }))?;
        Self::parse(value, "milestone")
    }

    /// Update a milestone's completion flag
    pub fn update_milestone(&self, milestone_id: u64, completed: bool) -> Result<Value> {
        self.send_post(
            &format!("update_milestone/{milestone_id}"),
            &json!({ "is_completed": completed }),
        )
    }
}

impl CaseSource for ApiClient {
    fn case_ids(&self, project_id: u64, suite_id: u64, section_id: u64) -> Result<Vec<u64>> {
        self.case_ids_for_section(project_id, suite_id, section_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let with_slash = ApiClient::new("https://example.testrail.io/", "u", "p");
        let without_slash = ApiClient::new("https://example.testrail.io", "u", "p");

        assert_eq!(with_slash.url, "https://example.testrail.io/index.php?/api/v2/");
        assert_eq!(with_slash.url, without_slash.url);
    }
}
