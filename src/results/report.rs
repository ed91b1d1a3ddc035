//! Results report files
//!
//! At the end of a run the aggregated map can be written out as a JSON
//! payload keyed by full description string, one file per run. The `submit`
//! command reads these files back.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::common::{Error, Result};

use super::context::RunContext;

/// Write the results map as a timestamped JSON file under `dir`
///
/// Creates the directory if needed and returns the path written.
pub fn write_report(context: &RunContext, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("file_{}.json", Utc::now().timestamp()));
    let payload = serde_json::to_string_pretty(&context.to_json())?;
    fs::write(&path, payload)?;
    tracing::debug!(path = %path.display(), entries = context.len(), "results report written");
    Ok(path)
}

/// Read a results report file back into a context
pub fn load_report(path: &Path) -> Result<RunContext> {
    let content = fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| Error::ReportParse(format!("{}: {e}", path.display())))?;
    RunContext::from_json(&value)
}
