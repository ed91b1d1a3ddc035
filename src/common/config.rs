//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// TestRail server and scoping settings
    #[serde(default)]
    pub testrail: TestRailConfig,

    /// Artifact output settings
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

/// TestRail account and scoping settings
#[derive(Debug, Deserialize, Clone)]
pub struct TestRailConfig {
    /// Base URL of the TestRail installation
    #[serde(default)]
    pub url: String,

    /// Account user (usually an email address)
    #[serde(default)]
    pub user: String,

    /// Account password or API key
    #[serde(default)]
    pub password: String,

    /// Project the runs are created in
    #[serde(default)]
    pub project_id: u64,

    /// Suite the sections and cases belong to
    #[serde(default)]
    pub suite_id: u64,

    /// Name used for runs created without an explicit name
    #[serde(default = "default_run_name")]
    pub run_name: String,
}

impl Default for TestRailConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            password: String::new(),
            project_id: 0,
            suite_id: 0,
            run_name: default_run_name(),
        }
    }
}

fn default_run_name() -> String {
    "Automated run".to_string()
}

/// Artifact output settings
#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactsConfig {
    /// Directory results payloads are written under
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if no config file exists
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| super::Error::file_read(&path, &e))?;
                return toml::from_str(&content)
                    .map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }

    /// Directory the results payloads are written to
    pub fn reports_dir(&self) -> PathBuf {
        self.artifacts.dir.join("testrail_reports")
    }
}
