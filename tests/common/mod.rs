#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ecommerce_product_scraper::consent::ACCEPT_COOKIES_CLASS;
use ecommerce_product_scraper::pagination::LOAD_MORE_CLASS;
use ecommerce_product_scraper::{DriverError, PageSession, ScrapeOptions, SessionLauncher, Wait};

/// State of a scripted control at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Absent,
    Enabled,
    Disabled,
    Hidden,
    /// Present and displayed, but clicking it fails.
    Unclickable,
    /// Present, but the visibility query itself fails.
    Detached,
}

#[derive(Debug, Clone)]
pub struct MockPage {
    pub html: String,
    pub consent: Control,
    /// Load-more state before the first click, the second, and so on.
    /// The last entry repeats forever.
    pub load_more: Vec<Control>,
    pub fail_navigation: bool,
    pub panic_on_source: bool,
}

impl MockPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            consent: Control::Absent,
            load_more: vec![Control::Absent],
            fail_navigation: false,
            panic_on_source: false,
        }
    }

    pub fn consent(mut self, control: Control) -> Self {
        self.consent = control;
        self
    }

    pub fn load_more(mut self, states: &[Control]) -> Self {
        self.load_more = states.to_vec();
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panic_on_source = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct Stats {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

impl Stats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockElement {
    Consent(Control),
    LoadMore(Control),
}

#[derive(Debug, Default)]
struct SessionState {
    page: Option<MockPage>,
    step: usize,
    load_more_clicks: u32,
    consent_clicks: u32,
}

pub struct MockSession {
    pages: Arc<HashMap<String, MockPage>>,
    state: Mutex<SessionState>,
    stats: Arc<Stats>,
}

impl MockSession {
    /// A session that already shows `page`.
    pub fn showing(page: MockPage) -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
            state: Mutex::new(SessionState {
                page: Some(page),
                ..SessionState::default()
            }),
            stats: Arc::new(Stats::default()),
        }
    }

    pub fn load_more_clicks(&self) -> u32 {
        self.state.lock().unwrap().load_more_clicks
    }

    pub fn consent_clicks(&self) -> u32 {
        self.state.lock().unwrap().consent_clicks
    }
}

#[async_trait]
impl PageSession for MockSession {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let page = match self.pages.get(url) {
            Some(page) if !page.fail_navigation => page.clone(),
            _ => {
                return Err(DriverError::Navigation {
                    url: url.to_owned(),
                    reason: "net::ERR_NAME_NOT_RESOLVED".to_owned(),
                })
            }
        };
        let mut state = self.state.lock().unwrap();
        state.page = Some(page);
        state.step = 0;
        Ok(())
    }

    async fn page_source(&self) -> Result<String, DriverError> {
        let state = self.state.lock().unwrap();
        match &state.page {
            Some(page) if page.panic_on_source => panic!("renderer crashed"),
            Some(page) => Ok(page.html.clone()),
            None => Ok(String::new()),
        }
    }

    async fn find_first(&self, class: &str) -> Result<Option<MockElement>, DriverError> {
        let state = self.state.lock().unwrap();
        let page = match &state.page {
            Some(page) => page,
            None => return Ok(None),
        };
        let element = match class {
            ACCEPT_COOKIES_CLASS => MockElement::Consent(page.consent),
            LOAD_MORE_CLASS => {
                let index = state.step.min(page.load_more.len().saturating_sub(1));
                let control = page.load_more.get(index).copied();
                MockElement::LoadMore(control.unwrap_or(Control::Absent))
            }
            _ => return Ok(None),
        };
        match element {
            MockElement::Consent(Control::Absent) | MockElement::LoadMore(Control::Absent) => {
                Ok(None)
            }
            element => Ok(Some(element)),
        }
    }

    async fn attribute(
        &self,
        element: &MockElement,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let (base, control) = match element {
            MockElement::Consent(control) => ("btn acceptCookies", control),
            MockElement::LoadMore(control) => {
                ("btn btn-primary ecomerce-items-scroll-more", control)
            }
        };
        match name {
            "class" if *control == Control::Disabled => Ok(Some(format!("{} disabled", base))),
            "class" => Ok(Some(base.to_owned())),
            _ => Ok(None),
        }
    }

    async fn is_displayed(&self, element: &MockElement) -> Result<bool, DriverError> {
        let control = match element {
            MockElement::Consent(control) | MockElement::LoadMore(control) => *control,
        };
        match control {
            Control::Detached => Err(DriverError::Query(
                "node is detached from document".to_owned(),
            )),
            control => Ok(control != Control::Hidden),
        }
    }

    async fn click(&self, element: &MockElement) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        match element {
            MockElement::Consent(Control::Unclickable)
            | MockElement::LoadMore(Control::Unclickable) => {
                Err(DriverError::Interaction("element click intercepted".to_owned()))
            }
            MockElement::Consent(_) => {
                state.consent_clicks += 1;
                if let Some(page) = state.page.as_mut() {
                    page.consent = Control::Absent;
                }
                Ok(())
            }
            MockElement::LoadMore(_) => {
                state.load_more_clicks += 1;
                state.step += 1;
                Ok(())
            }
        }
    }

    async fn close(self) -> Result<(), DriverError> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out `MockSession`s that serve `pages` by URL.
pub struct MockLauncher {
    pages: Arc<HashMap<String, MockPage>>,
    pub stats: Arc<Stats>,
    fail_open: bool,
}

impl MockLauncher {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = (S, MockPage)>,
        S: Into<String>,
    {
        Self {
            pages: Arc::new(pages.into_iter().map(|(url, page)| (url.into(), page)).collect()),
            stats: Arc::new(Stats::default()),
            fail_open: false,
        }
    }

    pub fn failing_to_open(mut self) -> Self {
        self.fail_open = true;
        self
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    type Session = MockSession;

    async fn open(&self) -> Result<MockSession, DriverError> {
        if self.fail_open {
            return Err(DriverError::Launch("chrome not found".to_owned()));
        }
        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MockSession {
            pages: Arc::clone(&self.pages),
            state: Mutex::new(SessionState::default()),
            stats: Arc::clone(&self.stats),
        })
    }
}

pub fn quick_wait() -> Wait {
    Wait::new(Duration::from_millis(200), Duration::from_millis(10))
}

pub fn quick_options() -> ScrapeOptions {
    ScrapeOptions {
        consent_wait: quick_wait(),
        load_more_wait: quick_wait(),
        max_load_more_clicks: 50,
    }
}

pub fn item_html(title: &str, price: &str, stars: usize, reviews: &str) -> String {
    format!(
        r#"<div class="col-md-4 col-xl-4 col-lg-4">
            <div class="card thumbnail">
                <div class="product-wrapper card-body">
                    <div class="caption">
                        <h4 class="price float-end card-title pull-right">{price}</h4>
                        <h4><a href="/test-sites/e-commerce/more/product/1" class="title" title="{title}">{title}</a></h4>
                        <p class="description card-text">{title} description</p>
                    </div>
                    <div class="ratings">
                        <p class="review-count float-end">{reviews}</p>
                        <p data-rating="{stars}">{spans}</p>
                    </div>
                </div>
            </div>
        </div>"#,
        spans = r#"<span class="ws-icon ws-icon-star"></span>"#.repeat(stars),
    )
}

pub fn listing_html(items: &[String]) -> String {
    format!(
        r#"<html><body><div class="container test-site"><div class="row ecomerce-items">{}</div>
        <a class="btn btn-lg btn-block btn-primary ecomerce-items-scroll-more">More</a></div></body></html>"#,
        items.concat()
    )
}
