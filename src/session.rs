//! Browser automation boundary.
//!
//! The scraper only needs a small capability set from a browser: load a URL,
//! snapshot the rendered HTML, find an element by class, inspect and click it.
//! `ChromeSession` implements it on top of chromiumoxide; the integration
//! tests implement it in memory.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};

use crate::error::DriverError;

/// One isolated browser session. Never shared between categories.
#[async_trait]
pub trait PageSession: Send + Sync {
    type Element: Send + Sync;

    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// HTML of the page as currently rendered.
    async fn page_source(&self) -> Result<String, DriverError>;

    /// First element carrying `class`, if any is rendered right now.
    async fn find_first(&self, class: &str) -> Result<Option<Self::Element>, DriverError>;

    async fn attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    async fn is_displayed(&self, element: &Self::Element) -> Result<bool, DriverError>;

    async fn click(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Releases the browser. Must be called on every exit path.
    async fn close(self) -> Result<(), DriverError>;
}

/// Creates a fresh session per category.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: PageSession + 'static;

    async fn open(&self) -> Result<Self::Session, DriverError>;
}

/// Timeout and poll interval of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitCondition {
    /// The element is in the DOM.
    Present,
    /// The element is in the DOM, displayed and not marked disabled.
    Clickable,
}

/// Polls for an element with `class` until `condition` holds.
///
/// Returns `Ok(None)` once `wait.timeout` has elapsed without a match.
/// Query errors are propagated immediately.
pub async fn wait_for<S>(
    session: &S,
    class: &str,
    condition: WaitCondition,
    wait: Wait,
) -> Result<Option<S::Element>, DriverError>
where
    S: PageSession + ?Sized,
{
    let deadline = Instant::now() + wait.timeout;

    loop {
        if let Some(element) = session.find_first(class).await? {
            let ready = match condition {
                WaitCondition::Present => true,
                WaitCondition::Clickable => {
                    session.is_displayed(&element).await?
                        && !is_marked_disabled(session, &element).await?
                }
            };
            if ready {
                return Ok(Some(element));
            }
        }

        if Instant::now() >= deadline {
            return Ok(None);
        }
        sleep(wait.poll_interval).await;
    }
}

/// True when the element carries a `disabled` class token or attribute.
pub async fn is_marked_disabled<S>(session: &S, element: &S::Element) -> Result<bool, DriverError>
where
    S: PageSession + ?Sized,
{
    let class = session.attribute(element, "class").await?.unwrap_or_default();
    if class.split_whitespace().any(|token| token == "disabled") {
        return Ok(true);
    }
    Ok(session.attribute(element, "disabled").await?.is_some())
}
