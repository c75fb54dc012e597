use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use crate::export::write_products;
use crate::scraper::Scraper;
use crate::session::SessionLauncher;

#[derive(Debug)]
pub enum CategoryOutcome {
    Written { path: PathBuf, rows: usize },
    Failed { reason: String },
}

/// Per-category outcomes, in completion order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<(String, CategoryOutcome)>,
}

impl RunReport {
    pub fn written(&self) -> impl Iterator<Item = (&str, &Path, usize)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            CategoryOutcome::Written { path, rows } => Some((name.as_str(), path.as_path(), *rows)),
            CategoryOutcome::Failed { .. } => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            CategoryOutcome::Failed { reason } => Some((name.as_str(), reason.as_str())),
            CategoryOutcome::Written { .. } => None,
        })
    }
}

/// Scrapes every category concurrently and writes `<output_dir>/<name>.csv`
/// for each one as it finishes.
///
/// At most `concurrency` scrapes run at once. A failing category is recorded
/// in the report and never affects the others.
pub async fn run_all<L>(
    scraper: &Scraper<L>,
    categories: &BTreeMap<String, String>,
    output_dir: &Path,
    concurrency: usize,
) -> RunReport
where
    L: SessionLauncher + 'static,
{
    let tasks = categories.iter().map(|(name, url)| {
        let scraper = scraper.clone();
        let name = name.clone();
        let url = url.clone();
        async move {
            let handle = tokio::spawn(async move { scraper.scrape_category(&url).await });
            (name, handle.await)
        }
    });

    let mut completed = stream::iter(tasks).buffer_unordered(concurrency.max(1));
    let mut report = RunReport::default();

    while let Some((name, joined)) = completed.next().await {
        let outcome = match joined {
            Ok(Ok(products)) => {
                let path = output_dir.join(format!("{}.csv", name));
                match write_products(&path, &products) {
                    Ok(()) => {
                        info!(
                            category = %name,
                            path = %path.display(),
                            rows = products.len(),
                            "Saved products"
                        );
                        CategoryOutcome::Written {
                            path,
                            rows: products.len(),
                        }
                    }
                    Err(err) => {
                        error!(category = %name, reason = %err, "Error saving products");
                        CategoryOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                }
            }
            Ok(Err(err)) => {
                error!(category = %name, reason = %err, "Error retrieving products");
                CategoryOutcome::Failed {
                    reason: err.to_string(),
                }
            }
            Err(join_err) => {
                error!(category = %name, reason = %join_err, "Scrape task aborted");
                CategoryOutcome::Failed {
                    reason: join_err.to_string(),
                }
            }
        };
        report.outcomes.push((name, outcome));
    }

    report
}
