use tracing::{debug, info, warn};

use crate::error::DriverError;
use crate::session::{is_marked_disabled, wait_for, PageSession, Wait, WaitCondition};

pub const LOAD_MORE_CLASS: &str = "ecomerce-items-scroll-more";

/// Why the load-more loop ended. Every variant is terminal and non-fatal.
#[derive(Debug)]
pub enum PaginationStop {
    /// The control is marked disabled: no more data.
    Disabled,
    /// The control is present but not displayed: no more data.
    Hidden,
    /// The control never appeared within the wait.
    NotFound,
    /// The control vanished or refused the click.
    Interaction(DriverError),
    /// The click ceiling was reached before the control was exhausted.
    ClickLimit,
}

impl PaginationStop {
    /// True for the stops that mean the page said it has nothing more.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, PaginationStop::Disabled | PaginationStop::Hidden)
    }
}

#[derive(Debug)]
pub struct PaginationReport {
    pub clicks: u32,
    pub stop: PaginationStop,
}

/// Clicks the load-more control until the page reports it exhausted.
///
/// At most `max_clicks` clicks are issued.
pub async fn load_all_products<S>(session: &S, wait: Wait, max_clicks: u32) -> PaginationReport
where
    S: PageSession + ?Sized,
{
    let mut clicks = 0;

    let stop = loop {
        if clicks >= max_clicks {
            break PaginationStop::ClickLimit;
        }

        let button = match wait_for(session, LOAD_MORE_CLASS, WaitCondition::Present, wait).await {
            Ok(Some(button)) => button,
            Ok(None) => break PaginationStop::NotFound,
            Err(err) => break PaginationStop::Interaction(err),
        };

        match is_marked_disabled(session, &button).await {
            Ok(true) => break PaginationStop::Disabled,
            Ok(false) => {}
            Err(err) => break PaginationStop::Interaction(err),
        }
        match session.is_displayed(&button).await {
            Ok(true) => {}
            Ok(false) => break PaginationStop::Hidden,
            Err(err) => break PaginationStop::Interaction(err),
        }

        if let Err(err) = session.click(&button).await {
            break PaginationStop::Interaction(err);
        }
        clicks += 1;
        debug!(clicks, "Clicked 'More' button");
    };

    match &stop {
        PaginationStop::Disabled | PaginationStop::Hidden => {
            info!(
                clicks,
                reason = ?stop,
                "'More' button is either disabled or not displayed"
            );
        }
        PaginationStop::NotFound => {
            info!(clicks, timeout = ?wait.timeout, "'More' button was not found");
        }
        PaginationStop::Interaction(err) => {
            warn!(clicks, reason = %err, "'More' button became unavailable");
        }
        PaginationStop::ClickLimit => {
            warn!(clicks, "Stopped paginating at the click limit");
        }
    }

    PaginationReport { clicks, stop }
}
