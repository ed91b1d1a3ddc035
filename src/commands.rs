//! CLI command definitions
//!
//! Defines the clap commands for the caravan CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Set up caravan in the current project (config and artifacts layout)
    Init,

    /// Create a test run, scoped to the whole suite or to one section
    CreateRun {
        /// Run name (defaults to the configured run name)
        name: Option<String>,

        /// Restrict the run to a section and everything nested under it
        #[arg(long)]
        section_id: Option<u64>,

        /// Like --section-id, but looked up by section name
        #[arg(long, conflicts_with = "section_id")]
        section: Option<String>,
    },

    /// Submit a saved results report to an open run
    Submit {
        /// Run to submit into
        run_id: u64,

        /// Results JSON file written at the end of a test run
        #[arg(long)]
        results: PathBuf,
    },

    /// Close a run
    CloseRun {
        /// Run to close
        run_id: u64,

        /// Mark every still-untested test failed before closing
        #[arg(long)]
        fail_untested: bool,
    },

    /// Milestone management
    #[command(subcommand)]
    Milestone(MilestoneCommands),
}

#[derive(Subcommand)]
pub enum MilestoneCommands {
    /// Create a milestone (the name gets a creation timestamp suffix)
    Add {
        /// Milestone name
        name: String,
    },

    /// Mark a milestone completed
    Close {
        /// Milestone id
        id: u64,
    },
}
