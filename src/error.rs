//! Library error type.

use thiserror::Error;

/// Errors raised by the preview, extraction and export pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Page {page} is out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("No area selected")]
    NoSelection,

    #[error("Nothing is rendered on the canvas")]
    EmptyCanvas,

    #[error("Response did not contain a <table> element")]
    NoTableMarkup,

    #[error("Invalid CSS selector: {0}")]
    Selector(String),

    #[error("Upload rejected ({status}): {message}")]
    Upload { status: u16, message: String },

    #[error("Table does not fit a worksheet: {0}")]
    SheetLimit(String),

    #[error("No table has been extracted")]
    NoTable,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
