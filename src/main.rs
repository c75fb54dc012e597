use std::fs;

use anyhow::Context;
use ecommerce_product_scraper::chrome::ChromeLauncher;
use ecommerce_product_scraper::config::Settings;
use ecommerce_product_scraper::{run_all, telemetry, Scraper};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let settings = Settings::new().context("failed to load settings")?;
    fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("failed to create {}", settings.output_dir.display()))?;

    info!(
        categories = settings.categories.len(),
        concurrency = settings.concurrency,
        "Scraping products"
    );

    let scraper = Scraper::new(ChromeLauncher::default(), settings.scrape_options());
    let report = run_all(
        &scraper,
        &settings.categories,
        &settings.output_dir,
        settings.concurrency,
    )
    .await;

    for (category, path, rows) in report.written() {
        info!(category, path = %path.display(), rows, "Done");
    }
    for (category, reason) in report.failed() {
        warn!(category, reason, "No CSV written");
    }

    Ok(())
}
