use crate::core::dataset::MobileFoodSchedule;
use crate::core::socrata::CredentialOverrides;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Command line arguments for DataSF
#[derive(Parser, Debug)]
#[command(
    name = "datasf",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tool to interact with Data SF data sets",
    long_about = "Tool to interact with Data SF data sets. Queries the Socrata endpoints behind DataSF and pages through the results interactively, one screen at a time."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// API key, takes precedence over username/password [env: API_KEY]
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// User to authenticate as [env: USERNAME]
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Password to authenticate with [env: PASSWORD]
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn credential_overrides(&self) -> CredentialOverrides {
        CredentialOverrides {
            api_key: self.api_key.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interacts with mobile food schedule dataset
    #[command(name = "mobile_food_schedule", visible_alias = "mfs")]
    MobileFoodSchedule(ScheduleArgs),
    /// List supported datasets
    Datasets,
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

impl Command {
    /// Registry name of the dataset this command browses
    pub fn dataset_name(&self) -> Option<&'static str> {
        match self {
            Command::MobileFoodSchedule(_) => Some(MobileFoodSchedule::DATASET_NAME),
            _ => None,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Fixed-width columns
    #[default]
    Text,
    /// Bordered table per page
    Table,
    /// JSON array per page
    Json,
}

/// Pagination arguments shared by every dataset
#[derive(ClapArgs, Debug, Clone)]
pub struct PageArgs {
    /// Number of results to show per page, default: 10
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Results to skip
    #[arg(long, default_value_t = 0)]
    pub page_offset: u64,
}

/// Mobile food schedule arguments
#[derive(ClapArgs, Debug, Clone)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Day of the week 0: Sunday, ..., 6: Saturday, default: today
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub day: Option<u8>,

    /// Time of the day in 24hr format: HH:MM, default: now
    #[arg(long, value_parser = parse_time)]
    pub time: Option<String>,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Create default configuration
    Init {
        /// Where to write the file, default: ~/.config/datasf/config.toml
        #[arg(short = 'f', long = "file", id = "init_file")]
        file: Option<PathBuf>,
    },
}

/// Accept a 24h `HH:MM` time
pub fn parse_time(value: &str) -> Result<String, String> {
    let invalid = || format!("'{}' is not a valid time, expected HH:MM", value);

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2
        || minutes.len() != 2
        || !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(value.to_string())
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_mobile_food_schedule() {
        let args = Args::try_parse_from([
            "datasf",
            "mobile_food_schedule",
            "--day",
            "3",
            "--time",
            "13:45",
            "--page-size",
            "5",
            "--page-offset",
            "15",
        ])
        .unwrap();

        match args.command {
            Command::MobileFoodSchedule(schedule) => {
                assert_eq!(schedule.day, Some(3));
                assert_eq!(schedule.time.as_deref(), Some("13:45"));
                assert_eq!(schedule.page.page_size, Some(5));
                assert_eq!(schedule.page.page_offset, 15);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_alias_and_defaults() {
        let args = Args::try_parse_from(["datasf", "mfs"]).unwrap();
        assert_eq!(args.command.dataset_name(), Some("mobile_food_schedule"));
        assert_eq!(args.output, OutputFormat::Text);

        match args.command {
            Command::MobileFoodSchedule(schedule) => {
                assert_eq!(schedule.day, None);
                assert_eq!(schedule.time, None);
                assert_eq!(schedule.page.page_size, None);
                assert_eq!(schedule.page.page_offset, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "datasf", "mfs", "--api-key", "k", "-o", "json", "--timeout", "5",
        ])
        .unwrap();
        assert_eq!(args.api_key.as_deref(), Some("k"));
        assert_eq!(args.output, OutputFormat::Json);
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.credential_overrides().api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Args::try_parse_from(["datasf", "mfs", "--day", "7"]).is_err());
        assert!(Args::try_parse_from(["datasf", "mfs", "--time", "25:00"]).is_err());
        assert!(Args::try_parse_from(["datasf", "mfs", "--page-size", "0"]).is_err());
        assert!(Args::try_parse_from(["datasf", "film_locations"]).is_err());
        assert!(Args::try_parse_from(["datasf"]).is_err());
    }

    #[test]
    fn test_config_init_file_with_output_format() {
        let args = Args::try_parse_from([
            "datasf", "-o", "json", "config", "init", "--file", "/tmp/datasf.toml",
        ])
        .unwrap();
        assert_eq!(args.output, OutputFormat::Json);

        match args.command {
            Command::Config(ConfigArgs {
                command: ConfigCommand::Init { file },
            }) => assert_eq!(file, Some(PathBuf::from("/tmp/datasf.toml"))),
            other => panic!("unexpected command: {:?}", other),
        }

        let args = Args::try_parse_from(["datasf", "config", "init", "-f", "a.toml"]).unwrap();
        assert_eq!(args.output, OutputFormat::default());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("00:00").unwrap(), "00:00");
        assert_eq!(parse_time("23:59").unwrap(), "23:59");
        assert!(parse_time("9:30").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("12-30").is_err());
        assert!(parse_time("12:3a").is_err());
        assert!(parse_time("'; DROP").is_err());
    }
}
