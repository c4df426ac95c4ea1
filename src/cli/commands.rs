use crate::cli::args::{Args, Command, ConfigCommand, PageArgs, ScheduleArgs};
use crate::cli::interactive::{InteractivePrinter, PrintSummary};
use crate::cli::output::{ConsoleWriter, DatasetRow, PageRenderer};
use crate::core::dataset::DatasetRegistry;
use crate::core::socrata::{Credentials, SocrataClient};
use crate::domain::config::DataSfConfig;
use crate::domain::error::DataSfResult;
use crate::domain::record::QueryParams;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{debug, info};

/// Execute CLI command
pub async fn execute_command(args: Args) -> DataSfResult<()> {
    let config_manager = ConfigManager::new(args.config.clone());
    let config = config_manager.load_config()?;

    if !args.quiet {
        init_logging(&config.global, args.verbose)?;
    }
    match config_manager.source_path() {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using defaults"),
    }
    debug!("Command: {:?}", args.command);

    let registry = DatasetRegistry::with_builtin();
    let writer = ConsoleWriter::new(args.output);

    match &args.command {
        Command::MobileFoodSchedule(schedule) => {
            let name = args.command.dataset_name().unwrap_or_default();
            execute_dataset_command(&args, schedule, name, &registry, &config).await?;
            Ok(())
        }
        Command::Datasets => {
            let rows: Vec<DatasetRow> = registry
                .entries()
                .iter()
                .map(|entry| {
                    let dataset = (entry.factory)();
                    DatasetRow::from(dataset.as_ref())
                })
                .collect();
            writer.write_datasets(&rows)
        }
        Command::Config(config_args) => match &config_args.command {
            ConfigCommand::Show => writer.write_config(&config, config_manager.source_path()),
            ConfigCommand::Init { file } => {
                let path = config_manager.init_config(file.clone())?;
                writer.write_message(&format!("Configuration written to {}", path.display()))
            }
        },
        Command::Version => writer.write_message(&format!("datasf {}", env!("CARGO_PKG_VERSION"))),
    }
}

/// Browse a dataset interactively on stdin/stdout
async fn execute_dataset_command(
    args: &Args,
    schedule: &ScheduleArgs,
    name: &str,
    registry: &DatasetRegistry,
    config: &DataSfConfig,
) -> DataSfResult<PrintSummary> {
    let dataset = registry.resolve(name)?;
    let (day, time) = dataset.resolve_defaults(schedule.day, schedule.time.clone());
    let params = query_params(&schedule.page, day, time, config);

    let credentials = Credentials::resolve(&args.credential_overrides(), &config.credentials);
    if credentials.is_anonymous() {
        debug!("No credentials set, requests may be rate limited");
    }
    let timeout = Duration::from_secs(args.timeout.unwrap_or(config.global.timeout_secs));
    info!(
        "Querying {} on {} as {} (day {}, time {})",
        dataset.dataset_id(),
        dataset.host(),
        credentials,
        params.day,
        params.time
    );

    // The client lives for exactly this run and is dropped on every exit path.
    let client = SocrataClient::open(dataset.host(), dataset.dataset_id(), credentials)?
        .with_timeout(timeout);

    let mut printer = InteractivePrinter::new(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        PageRenderer::new(args.output),
    );
    printer.run(dataset.as_ref(), &client, params).await
}

/// Combine pagination flags with configured defaults
pub fn query_params(page: &PageArgs, day: u8, time: String, config: &DataSfConfig) -> QueryParams {
    QueryParams {
        day,
        time,
        page_size: page
            .page_size
            .unwrap_or(config.global.default_page_size)
            .max(1),
        page_offset: page.page_offset,
    }
}
