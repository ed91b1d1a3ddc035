//! CLI command handling
//!
//! Dispatches CLI commands and formats output for humans.

use crate::commands::{Commands, MilestoneCommands};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::rail::client::ApiClient;
use crate::reporter::Reporter;
use crate::results::report;
use crate::scaffold;

/// Dispatch a CLI command
pub fn dispatch(command: Commands) -> Result<()> {
    // Init must work before any config exists.
    if matches!(command, Commands::Init) {
        return scaffold::run();
    }

    let config = Config::load()?;
    let reporter = reporter_from(&config)?;

    match command {
        Commands::Init => unreachable!("handled above"),

        Commands::CreateRun {
            name,
            section_id,
            section,
        } => {
            let name = name.unwrap_or_else(|| config.testrail.run_name.clone());
            let section_id = match (section_id, section) {
                (Some(id), _) => Some(id),
                (None, Some(section_name)) => {
                    Some(reporter.section_id_by_name(&section_name)?)
                }
                (None, None) => None,
            };

            let run_id = reporter.create_run(&name, section_id)?;
            println!("Created run {run_id}: {name}");
            Ok(())
        }

        Commands::Submit { run_id, results } => {
            let context = report::load_report(&results)?;
            let submitted = reporter.submit_results(run_id, &context)?;
            println!("Submitted {submitted} result(s) to run {run_id}");
            Ok(())
        }

        Commands::CloseRun {
            run_id,
            fail_untested,
        } => {
            if fail_untested {
                let failed = reporter.mark_untested_failed(run_id)?;
                if failed > 0 {
                    println!("Marked {failed} untested test(s) failed");
                }
            }
            reporter.close_run(run_id)?;
            println!("Closed run {run_id}");
            Ok(())
        }

        Commands::Milestone(milestone) => match milestone {
            MilestoneCommands::Add { name } => {
                let id = reporter.add_milestone(&name)?;
                println!("Created milestone {id}");
                Ok(())
            }
            MilestoneCommands::Close { id } => {
                reporter.close_milestone(id)?;
                println!("Closed milestone {id}");
                Ok(())
            }
        },
    }
}

fn reporter_from(config: &Config) -> Result<Reporter> {
    let testrail = &config.testrail;
    if testrail.url.is_empty() {
        return Err(Error::Config(
            "testrail.url is not set. Run 'caravan init' and fill in caravan.toml".to_string(),
        ));
    }
    if testrail.project_id == 0 || testrail.suite_id == 0 {
        return Err(Error::Config(
            "testrail.project_id and testrail.suite_id must be set".to_string(),
        ));
    }

    let client = ApiClient::new(&testrail.url, &testrail.user, &testrail.password);
    Ok(Reporter::new(client, testrail.project_id, testrail.suite_id))
}
