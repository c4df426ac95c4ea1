use crate::cli::args::OutputFormat;
use crate::core::dataset::Dataset;
use crate::domain::config::DataSfConfig;
use crate::domain::error::{DataSfError, DataSfResult};
use crate::domain::record::{Page, Record};
use serde::Serialize;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Renders pages of a dataset in the selected output format
#[derive(Debug, Clone, Copy)]
pub struct PageRenderer {
    format: OutputFormat,
}

impl PageRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Header printed once before any page; only the text format has one
    pub fn header(&self, dataset: &dyn Dataset) -> DataSfResult<Option<String>> {
        match self.format {
            OutputFormat::Text => dataset.format_header().map(Some),
            OutputFormat::Table | OutputFormat::Json => Ok(None),
        }
    }

    /// Render one page; a throttled page renders to `None`
    pub fn render(&self, dataset: &dyn Dataset, page: &Page) -> DataSfResult<Option<String>> {
        let records = page.records.as_deref();
        match self.format {
            OutputFormat::Text => dataset.format_page(records),
            OutputFormat::Table => records
                .map(|records| render_table(dataset, records))
                .transpose(),
            OutputFormat::Json => records
                .map(|records| serde_json::to_string_pretty(records).map_err(DataSfError::from))
                .transpose(),
        }
    }
}

fn render_table(dataset: &dyn Dataset, records: &[Record]) -> DataSfResult<String> {
    let mut builder = Builder::default();
    builder.push_record(dataset.headers().iter().map(|h| h.to_string()));

    for (index, record) in records.iter().enumerate() {
        let row = dataset
            .fields()
            .iter()
            .map(|field| {
                record.field(field).ok_or_else(|| DataSfError::MalformedRecord {
                    index,
                    field: field.to_string(),
                })
            })
            .collect::<DataSfResult<Vec<String>>>()?;
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    Ok(table.to_string())
}

/// Dataset registry row
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct DatasetRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Alias")]
    pub alias: String,
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Host")]
    pub host: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&dyn Dataset> for DatasetRow {
    fn from(dataset: &dyn Dataset) -> Self {
        Self {
            name: dataset.name().to_string(),
            alias: dataset.alias().to_string(),
            id: dataset.dataset_id().to_string(),
            host: dataset.host().to_string(),
            description: dataset.description().to_string(),
        }
    }
}

/// Console output writer for non-interactive commands
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write_datasets(&self, datasets: &[DatasetRow]) -> DataSfResult<()> {
        match self.format {
            OutputFormat::Text => {
                for dataset in datasets {
                    println!("{} ({})", dataset.name, dataset.alias);
                    println!("  Id: {}", dataset.id);
                    println!("  Host: {}", dataset.host);
                    println!("  {}", dataset.description);
                }
            }
            OutputFormat::Table => {
                let mut table = Table::new(datasets);
                table.with(Style::modern());
                println!("{}", table);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(datasets)?);
            }
        }
        Ok(())
    }

    /// Print configuration with secrets masked
    pub fn write_config(&self, config: &DataSfConfig, source: Option<&Path>) -> DataSfResult<()> {
        let config = config.masked();
        let source = source
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string());

        match self.format {
            OutputFormat::Text | OutputFormat::Table => {
                println!("DataSF Configuration ({}):", source);
                println!("  Log level: {}", config.global.log_level);
                println!("  Timeout: {}s", config.global.timeout_secs);
                println!("  Default page size: {}", config.global.default_page_size);
                println!("  Credentials:");
                let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
                println!("    api_key: {}", show(&config.credentials.api_key));
                println!("    username: {}", show(&config.credentials.username));
                println!("    password: {}", show(&config.credentials.password));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        Ok(())
    }

    pub fn write_message(&self, message: &str) -> DataSfResult<()> {
        println!("{}", message);
        Ok(())
    }
}
