use select::document::Document;
use select::node::Node;
use select::predicate::Class;
use tracing::{debug, warn};

use crate::error::DriverError;
use crate::product::{parse_price, parse_review_count, Product, ProductError};
use crate::session::PageSession;

pub const ITEM_CLASS: &str = "thumbnail";
pub const TITLE_CLASS: &str = "title";
pub const DESCRIPTION_CLASS: &str = "description";
pub const PRICE_CLASS: &str = "price";
pub const RATING_STAR_CLASS: &str = "ws-icon-star";
pub const REVIEWS_CLASS: &str = "ratings";

/// Parses every item container in `html`, in document order.
///
/// Each container yields its own result; a bad item never hides the others.
pub fn parse_products(html: &str) -> Vec<Result<Product, ProductError>> {
    let document = Document::from(html);
    document.find(Class(ITEM_CLASS)).map(parse_product).collect()
}

fn parse_product(item: Node) -> Result<Product, ProductError> {
    let title = item
        .find(Class(TITLE_CLASS))
        .next()
        .and_then(|n| n.attr("title"))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ProductError::MissingField("title"))?
        .to_owned();

    let description = item
        .find(Class(DESCRIPTION_CLASS))
        .next()
        .ok_or(ProductError::MissingField("description"))?
        .text()
        .trim()
        .to_owned();

    let price = item
        .find(Class(PRICE_CLASS))
        .next()
        .ok_or(ProductError::MissingField("price"))?;
    let price = parse_price(&price.text())?;

    let rating = item.find(Class(RATING_STAR_CLASS)).count() as u32;

    let reviews = item
        .find(Class(REVIEWS_CLASS))
        .next()
        .ok_or(ProductError::MissingField("reviews"))?;
    let num_of_reviews = parse_review_count(&reviews.text())?;

    Ok(Product {
        title,
        description,
        price,
        rating,
        num_of_reviews,
    })
}

/// Extracts the products currently rendered in `session`, dropping items
/// that fail to parse.
pub async fn extract<S>(session: &S) -> Result<Vec<Product>, DriverError>
where
    S: PageSession + ?Sized,
{
    let html = session.page_source().await?;

    let mut products = Vec::new();
    for (index, result) in parse_products(&html).into_iter().enumerate() {
        match result {
            Ok(product) => products.push(product),
            Err(err) => warn!(index, reason = %err, "Error scraping product"),
        }
    }

    debug!(count = products.len(), "Extracted products");
    Ok(products)
}
