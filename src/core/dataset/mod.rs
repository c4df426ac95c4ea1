// Dataset module - Per-dataset query policies and pagination
pub mod mobile_food_schedule;
pub mod paginator;
pub mod registry;

pub use mobile_food_schedule::MobileFoodSchedule;
pub use paginator::Paginator;
pub use registry::{DatasetRegistry, RegistryEntry};

use crate::domain::error::{DataSfError, DataSfResult};
use crate::domain::record::{QueryParams, Record};

/// Default total display width of a formatted row
pub const DEFAULT_WIDTH: usize = 200;

/// Uniform capability interface every supported dataset implements.
///
/// The driver only talks to datasets through this trait, so adding a
/// dataset means implementing it and registering a factory.
pub trait Dataset: Send + Sync {
    /// Subcommand name
    fn name(&self) -> &'static str;

    /// Short subcommand alias
    fn alias(&self) -> &'static str;

    /// Socrata dataset identifier, e.g. `jjew-r69b`
    fn dataset_id(&self) -> &'static str;

    /// Host serving the dataset
    fn host(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Record fields selected and displayed, in column order
    fn fields(&self) -> &'static [&'static str];

    /// Display headers matching `fields`
    fn headers(&self) -> &'static [&'static str];

    fn width(&self) -> usize {
        DEFAULT_WIDTH
    }

    /// Fill in the day and time filters the user left out
    fn resolve_defaults(&self, day: Option<u8>, time: Option<String>) -> (u8, String);

    /// SoQL query for one page
    fn build_query(&self, params: &QueryParams) -> String;

    /// Synthetic record mapping each field to its header
    fn header_record(&self) -> Record {
        Record::from_pairs(self.fields().iter().copied().zip(self.headers().iter().copied()))
    }

    /// Render records as fixed-width rows.
    ///
    /// The total width is split evenly between the headers and every value is
    /// left-justified to its column width. Values longer than a column are not
    /// truncated. `None` in gives `None` out.
    fn format_page(&self, records: Option<&[Record]>) -> DataSfResult<Option<String>> {
        let Some(records) = records else {
            return Ok(None);
        };
        let col_width = self.width() / self.headers().len().max(1);

        let lines = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.fields()
                    .iter()
                    .map(|field| {
                        record
                            .field(field)
                            .map(|value| format!("{:<width$}", value, width = col_width))
                            .ok_or_else(|| DataSfError::MalformedRecord {
                                index,
                                field: field.to_string(),
                            })
                    })
                    .collect::<DataSfResult<String>>()
            })
            .collect::<DataSfResult<Vec<String>>>()?;

        Ok(Some(lines.join("\n")))
    }

    /// Header row rendered the same way as data rows
    fn format_header(&self) -> DataSfResult<String> {
        let header = [self.header_record()];
        Ok(self.format_page(Some(&header[..]))?.unwrap_or_default())
    }
}
