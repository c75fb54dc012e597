//! Scrapes the product listings of the webscraper.io "load more" e-commerce
//! demo into one CSV file per category.
//!
//! Each category gets its own headless browser: navigate, dismiss the cookie
//! banner, click "More" until the page runs out, parse the rendered items and
//! close the browser. Categories run concurrently and fail independently.

pub mod chrome;
pub mod config;
pub mod consent;
pub mod error;
pub mod export;
pub mod extract;
pub mod pagination;
pub mod product;
pub mod runner;
pub mod scraper;
pub mod session;
pub mod telemetry;

pub use error::{DriverError, ExportError, ScrapeError};
pub use product::{Product, ProductError};
pub use runner::{run_all, CategoryOutcome, RunReport};
pub use scraper::{ScrapeOptions, Scraper};
pub use session::{PageSession, SessionLauncher, Wait};
