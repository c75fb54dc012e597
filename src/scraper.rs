use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use tracing::{info, instrument, warn};

use crate::consent::accept_cookies;
use crate::error::ScrapeError;
use crate::extract::extract;
use crate::pagination::load_all_products;
use crate::product::Product;
use crate::session::{PageSession, SessionLauncher, Wait};

/// Wait budgets and the pagination ceiling for one category scrape.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeOptions {
    pub consent_wait: Wait,
    pub load_more_wait: Wait,
    pub max_load_more_clicks: u32,
}

/// Scrapes category pages, one fresh browser session per page.
pub struct Scraper<L> {
    launcher: Arc<L>,
    options: ScrapeOptions,
}

impl<L> Clone for Scraper<L> {
    fn clone(&self) -> Self {
        Self {
            launcher: Arc::clone(&self.launcher),
            options: self.options,
        }
    }
}

impl<L: SessionLauncher> Scraper<L> {
    pub fn new(launcher: L, options: ScrapeOptions) -> Self {
        Self {
            launcher: Arc::new(launcher),
            options,
        }
    }

    /// Opens a session, loads every product on `url` and closes the session
    /// again, whether the scrape succeeded, failed or panicked.
    #[instrument(skip(self))]
    pub async fn scrape_category(&self, url: &str) -> Result<Vec<Product>, ScrapeError> {
        let session = self.launcher.open().await?;

        let result = AssertUnwindSafe(self.scrape_with(&session, url))
            .catch_unwind()
            .await;

        if let Err(err) = session.close().await {
            warn!(reason = %err, "Failed to close browser session");
        }

        let products = match result {
            Ok(result) => result?,
            Err(payload) => panic::resume_unwind(payload),
        };
        info!(count = products.len(), "Scraped category");
        Ok(products)
    }

    async fn scrape_with(
        &self,
        session: &L::Session,
        url: &str,
    ) -> Result<Vec<Product>, ScrapeError> {
        session.navigate(url).await?;
        accept_cookies(session, self.options.consent_wait).await;
        let pagination = load_all_products(
            session,
            self.options.load_more_wait,
            self.options.max_load_more_clicks,
        )
        .await;
        if !pagination.stop.is_end_of_data() {
            info!(
                clicks = pagination.clicks,
                "Page did not signal the end of its products; extracting what is loaded"
            );
        }
        Ok(extract(session).await?)
    }
}
