//! chromiumoxide-backed browser sessions.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::DriverError;
use crate::session::{PageSession, SessionLauncher};

const IS_DISPLAYED_JS: &str = r#"function() {
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') {
        return false;
    }
    return !!(this.offsetWidth || this.offsetHeight || this.getClientRects().length);
}"#;

/// Launches one headless Chrome process per session.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    request_timeout: Duration,
}

impl ChromeLauncher {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

impl Default for ChromeLauncher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn open(&self) -> Result<ChromeSession, DriverError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .request_timeout(self.request_timeout)
            .build()
            .map_err(DriverError::Launch)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        // The CDP connection only makes progress while the handler is polled.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(DriverError::Launch(e.to_string()));
            }
        };

        debug!("Browser session opened");
        Ok(ChromeSession {
            browser: Mutex::new(browser),
            page,
            handler_task,
        })
    }
}

/// A headless browser process with a single tab.
///
/// Dropping it without `close` still kills the child process, but `close`
/// waits for the exit and is the expected path.
pub struct ChromeSession {
    // Only touched by `close`; the lock keeps the session `Sync`.
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
}

fn class_selector(class: &str) -> String {
    format!(".{}", class)
}

#[async_trait]
impl PageSession for ChromeSession {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String, DriverError> {
        self.page
            .content()
            .await
            .map_err(|e| DriverError::Query(e.to_string()))
    }

    async fn find_first(&self, class: &str) -> Result<Option<Element>, DriverError> {
        let elements = self
            .page
            .find_elements(class_selector(class))
            .await
            .map_err(|e| DriverError::Query(e.to_string()))?;
        Ok(elements.into_iter().next())
    }

    async fn attribute(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        element
            .attribute(name)
            .await
            .map_err(|e| DriverError::Query(e.to_string()))
    }

    async fn is_displayed(&self, element: &Element) -> Result<bool, DriverError> {
        let returns = element
            .call_js_fn(IS_DISPLAYED_JS, false)
            .await
            .map_err(|e| DriverError::Query(e.to_string()))?;
        Ok(returns
            .result
            .value
            .and_then(|value| value.as_bool())
            .unwrap_or(false))
    }

    async fn click(&self, element: &Element) -> Result<(), DriverError> {
        element
            .click()
            .await
            .map_err(|e| DriverError::Interaction(e.to_string()))?;
        Ok(())
    }

    async fn close(self) -> Result<(), DriverError> {
        let mut browser = self.browser.into_inner();
        let closed = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| DriverError::Close(e.to_string()));
        if let Err(e) = browser.wait().await {
            warn!("Failed to reap browser process: {}", e);
        }
        self.handler_task.abort();
        debug!("Browser session closed");
        closed
    }
}
