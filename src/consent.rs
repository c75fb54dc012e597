use tracing::{info, warn};

use crate::session::{wait_for, PageSession, Wait, WaitCondition};

pub const ACCEPT_COOKIES_CLASS: &str = "acceptCookies";

/// Dismisses the cookie banner if one shows up within `wait`.
///
/// Best effort: a missing banner or a failed click is logged and otherwise
/// ignored. Returns whether the banner was accepted.
pub async fn accept_cookies<S>(session: &S, wait: Wait) -> bool
where
    S: PageSession + ?Sized,
{
    let found = wait_for(session, ACCEPT_COOKIES_CLASS, WaitCondition::Clickable, wait).await;
    let button = match found {
        Ok(Some(button)) => button,
        Ok(None) => {
            info!(timeout = ?wait.timeout, "Cookies not accepted: no consent control");
            return false;
        }
        Err(err) => {
            warn!(reason = %err, "Cookies not accepted");
            return false;
        }
    };

    match session.click(&button).await {
        Ok(()) => {
            info!("Cookies accepted");
            true
        }
        Err(err) => {
            warn!(reason = %err, "Cookies not accepted");
            false
        }
    }
}
