//! Error types shared by the chart pipeline and the export flow.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Developer error: tables that must line up with the axis list do not.
    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Theme Parsing Error: {0}")]
    Theme(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Nothing to export: {0}")]
    NotReady(String),
}

pub type ChartResult<T> = Result<T, ChartError>;
