//! Command dispatch

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use garita_app::{Config, InspectionService, InspectionSubmission};
use garita_domain::repository::{ConsecutiveCounter, InspectionHistoryRepository};
use garita_infra::persistence::{SheetConsecutiveCounter, SheetInspectionRepository};
use garita_infra::pipeline::LoggingReportPipeline;
use garita_infra::registry::{load_fleet_csv, seed_registry_sheet, SheetFleetRegistry};
use garita_store::{MemorySheetsClient, SheetsClient};
use garita_types::{ConfigError, Error, Result};

use crate::cli::{Cli, Command};
use crate::output;

struct Context {
    client: Arc<MemorySheetsClient>,
    config: Config,
}

impl Context {
    fn open(cli: &Cli) -> Result<Context> {
        let mut config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(dir) = &cli.store_dir {
            config.store_dir = Some(dir.clone());
        }

        let client = Arc::new(MemorySheetsClient::open(config.resolve_store_dir())?);
        Ok(Context { client, config })
    }

    fn history(&self) -> SheetInspectionRepository {
        SheetInspectionRepository::new(self.client.clone(), self.config.inspection_sheet.clone())
    }

    fn counter(&self) -> SheetConsecutiveCounter {
        SheetConsecutiveCounter::new(self.client.clone(), self.config.counter_sheet.clone())
            .with_max_attempts(self.config.counter_attempts)
    }

    fn registry(&self) -> SheetFleetRegistry {
        SheetFleetRegistry::new(
            self.client.clone(),
            self.config.registry_sheet.clone(),
            self.config.branch_recipients.clone(),
        )
    }

    fn service(&self) -> InspectionService {
        InspectionService::new(
            Arc::new(self.history()),
            Arc::new(self.registry()),
            Arc::new(self.counter()),
            Arc::new(LoggingReportPipeline),
        )
    }
}

fn read_submission(path: &PathBuf) -> Result<InspectionSubmission> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::InvalidSubmission(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::InvalidSubmission(format!("failed to parse {}: {e}", path.display()))
    })
}

pub fn execute(cli: Cli) -> Result<()> {
    let context = Context::open(&cli)?;
    let format = cli.format;

    match cli.command {
        Command::Check { plate } => {
            let state = context.service().check_plate(&plate)?;
            output::print_plate_state(&plate, &state, format);
        }

        Command::Exit { file } => {
            let submission = match read_submission(&file)? {
                InspectionSubmission::Exit(submission) => submission,
                InspectionSubmission::Entry(_) => {
                    return Err(Error::InvalidSubmission(
                        "expected an exit submission, got kind \"entry\"".to_string(),
                    ))
                }
            };
            let receipt = context.service().register_exit(submission)?;
            output::print_exit_receipt(&receipt, format);
        }

        Command::Entry { file } => {
            let submission = match read_submission(&file)? {
                InspectionSubmission::Entry(submission) => submission,
                InspectionSubmission::Exit(_) => {
                    return Err(Error::InvalidSubmission(
                        "expected an entry submission, got kind \"exit\"".to_string(),
                    ))
                }
            };
            let receipt = context.service().register_entry(submission)?;
            output::print_entry_receipt(&receipt, format);
        }

        Command::NextNumber { branch } => {
            let number = context.counter().next_number(&branch)?;
            output::print_number(&branch, number, format);
        }

        Command::History { plate } => {
            let log = context.history().plate_log(&plate)?;
            output::print_history(&plate, &log, format);
        }

        Command::ImportRegistry { file } => {
            let rows = load_fleet_csv(&file)
                .map_err(|e| Error::Config(ConfigError::ParseError(e.to_string())))?;
            let client: Arc<dyn SheetsClient> = context.client.clone();
            seed_registry_sheet(&client, &context.config.registry_sheet, &rows)?;
            println!("Imported {} vehicles into {}", rows.len(), context.config.registry_sheet);
        }
    }

    Ok(())
}
