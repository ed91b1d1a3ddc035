//! Project initialization
//!
//! `caravan init` drops a config template and the artifacts directory
//! layout into the current project, and keeps `artifacts/` out of git.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::common::paths::CONFIG_FILE;
use crate::common::Result;

const CONFIG_TEMPLATE: &str = r#"# Generated by caravan.
# Fill in each line with the credentials of your TestRail account.

[testrail]
url = ""
user = ""
password = ""
project_id = 0
suite_id = 0
# Name used for runs created without an explicit name.
run_name = "Automated run"

[artifacts]
# Results payloads are written under <dir>/testrail_reports/.
dir = "artifacts"
"#;

/// Initialize the current directory
pub fn run() -> Result<()> {
    run_in(Path::new("."))
}

/// Initialize a project rooted at `root`
pub fn run_in(root: &Path) -> Result<()> {
    let config = root.join(CONFIG_FILE);
    if config.exists() {
        println!("  {CONFIG_FILE} already exists, nothing to do");
        return Ok(());
    }

    create_file(&config, CONFIG_TEMPLATE)?;
    create_dir(&root.join("artifacts/testrail_reports"))?;
    append_line(&root.join(".gitignore"), "artifacts/")?;

    println!();
    println!("  Fill in {CONFIG_FILE} with your TestRail credentials to get going.");
    Ok(())
}

fn create_file(path: &Path, content: &str) -> Result<()> {
    println!("  creating   {}", path.display());
    fs::write(path, content)?;
    Ok(())
}

fn create_dir(path: &Path) -> Result<()> {
    if path.exists() {
        println!("     exists   {}", path.display());
    } else {
        println!("  creating   {}", path.display());
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let existing = fs::read_to_string(path).unwrap_or_default();
    if existing.lines().any(|l| l.trim() == line) {
        println!("     exists   {}", path.display());
        return Ok(());
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    println!("  updating   {}", path.display());
    Ok(())
}
