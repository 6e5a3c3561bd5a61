// Source trait for survey response data
use crate::domain::survey::ResponseTable;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid URL: {0} is not a public Google Sheets link")]
    InvalidUrl(String),

    #[error("failed to fetch spreadsheet: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("spreadsheet request to {url} failed with status {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to parse spreadsheet CSV: {0}")]
    Parse(#[from] csv::Error),
}

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Load the whole response table in one pass
    async fn load_table(&self) -> Result<ResponseTable, SheetError>;
}
