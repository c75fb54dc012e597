use std::collections::BTreeMap;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::scraper::ScrapeOptions;
use crate::session::Wait;

pub const BASE_URL: &str = "https://webscraper.io/";
pub const HOME_PATH: &str = "test-sites/e-commerce/more/";

/// Runtime settings.
///
/// Layered as: built-in defaults, then an optional `scraper.toml` in the
/// working directory, then `SCRAPER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Category name to category page URL. Names become file stems.
    pub categories: BTreeMap<String, String>,
    pub output_dir: PathBuf,
    /// Upper bound on concurrently running category scrapes.
    pub concurrency: usize,
    pub consent_timeout_ms: u64,
    pub load_more_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub max_load_more_clicks: u32,
}

pub fn default_categories() -> BTreeMap<String, String> {
    [
        ("home", ""),
        ("computers", "computers"),
        ("laptops", "computers/laptops"),
        ("tablets", "computers/tablets"),
        ("phones", "phones"),
        ("touch", "phones/touch"),
    ]
    .into_iter()
    .map(|(name, path)| {
        let url = format!("{}{}{}", BASE_URL, HOME_PATH, path);
        (name.to_owned(), url)
    })
    .collect()
}

fn default_concurrency() -> usize {
    let cpus = thread::available_parallelism().map_or(1, |n| n.get());
    (cpus + 4).min(32)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            output_dir: PathBuf::from("."),
            concurrency: default_concurrency(),
            consent_timeout_ms: 2_000,
            load_more_timeout_ms: 2_000,
            poll_interval_ms: 100,
            max_load_more_clicks: 500,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("scraper").required(false))
            .add_source(
                Environment::with_prefix("SCRAPER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Message("concurrency must be at least 1".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Message("poll_interval_ms must be at least 1".into()));
        }
        Ok(())
    }

    pub fn scrape_options(&self) -> ScrapeOptions {
        let poll = Duration::from_millis(self.poll_interval_ms);
        ScrapeOptions {
            consent_wait: Wait::new(Duration::from_millis(self.consent_timeout_ms), poll),
            load_more_wait: Wait::new(Duration::from_millis(self.load_more_timeout_ms), poll),
            max_load_more_clicks: self.max_load_more_clicks,
        }
    }
}
