//! DataSF Library
//!
//! Client for DataSF open data sets: a Socrata query client, per-dataset
//! query policies, lazy pagination and an interactive page printer.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::dataset::{Dataset, DatasetRegistry, MobileFoodSchedule, Paginator};
pub use crate::core::socrata::{Credentials, QueryClient, SocrataClient};
pub use domain::config::DataSfConfig;
pub use domain::error::{DataSfError, DataSfResult};
pub use domain::record::{Page, QueryParams, Record};
