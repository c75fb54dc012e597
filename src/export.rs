use std::fs::File;
use std::path::Path;

use csv::{Reader, Writer};

use crate::error::ExportError;
use crate::product::Product;

pub const HEADER: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// Writes `products` to `path`, replacing any previous file.
///
/// The header row is written even when there are no products.
pub fn write_products(path: &Path, products: &[Product]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(HEADER)?;

    for product in products {
        let price = product.price.to_string();
        let rating = product.rating.to_string();
        let num_of_reviews = product.num_of_reviews.to_string();
        writer.write_record([
            &product.title,
            &product.description,
            &price,
            &rating,
            &num_of_reviews,
        ])?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

/// Reads back a file written by `write_products`.
pub fn read_products(path: &Path) -> Result<Vec<Product>, ExportError> {
    let mut reader = Reader::from_path(path)?;
    let mut products = Vec::new();
    for record in reader.deserialize() {
        products.push(record?);
    }
    Ok(products)
}
