use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One scraped listing. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub rating: u32,
    pub num_of_reviews: u32,
}

/// Why a single item container could not be turned into a `Product`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid price {0:?}")]
    InvalidPrice(String),
    #[error("invalid review count {0:?}")]
    InvalidReviewCount(String),
}

/// Parses a currency-prefixed price such as `"$1139.54"`.
pub fn parse_price(text: &str) -> Result<f64, ProductError> {
    let raw = text.trim().replace('$', "");
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ProductError::InvalidPrice(text.trim().to_owned())),
    }
}

/// Parses the leading number of a label such as `"14 reviews"`.
pub fn parse_review_count(text: &str) -> Result<u32, ProductError> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .ok_or_else(|| ProductError::InvalidReviewCount(text.trim().to_owned()))
}
