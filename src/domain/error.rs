use thiserror::Error;

/// DataSF unified error type
#[derive(Error, Debug)]
pub enum DataSfError {
    #[error("Request returned code: {status}, message: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Dataset {0} is not supported")]
    UnsupportedDataset(String),

    #[error("Record {index} is missing field '{field}'")]
    MalformedRecord { index: usize, field: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DataSfResult<T> = Result<T, DataSfError>;
