use std::io;

use thiserror::Error;

/// Failures reported by a browser session.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("failed to navigate to {url}: {reason}")]
    Navigation { url: String, reason: String },
    #[error("element query failed: {0}")]
    Query(String),
    #[error("element not interactable: {0}")]
    Interaction(String),
    #[error("failed to close browser: {0}")]
    Close(String),
}

/// Failure of a whole category scrape.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Driver(#[from] DriverError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
