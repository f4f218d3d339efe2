//! Ingestion Data Types
//!
//! The raw CSV row as decoded from the catalog file, and the report returned once a load
//! finishes.

use crate::search::types::Product;
use serde::Deserialize;

/// Category assigned to rows with an empty `categoryName`.
pub const FALLBACK_CATEGORY: &str = "Other";

/// One catalog line. Columns not listed here are ignored, and every column is optional
/// at decode time; validity is decided by [`CatalogRow::into_product`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogRow {
    pub asin: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,
    #[serde(rename = "productURL")]
    pub product_url: Option<String>,
    pub stars: Option<String>,
    pub reviews: Option<String>,
    pub price: Option<String>,
    #[serde(rename = "isBestSeller")]
    pub is_best_seller: Option<String>,
    #[serde(rename = "categoryName")]
    pub category_name: Option<String>,
}

impl CatalogRow {
    /// Maps the row to an index record, or `None` if a required field is missing.
    ///
    /// Required: `asin` (becomes `objectID`), `title`, `imgUrl`, `productURL`.
    /// Numeric cells that do not parse become zero.
    pub fn into_product(self) -> Option<Product> {
        let object_id = non_empty(self.asin)?;
        let title = non_empty(self.title)?;
        let image = non_empty(self.img_url)?;
        let link = non_empty(self.product_url)?;

        Some(Product {
            object_id,
            title,
            image,
            link,
            stars: parse_float(self.stars.as_deref()),
            reviews: parse_or_zero(self.reviews.as_deref()),
            price: parse_float(self.price.as_deref()),
            is_best_seller: self
                .is_best_seller
                .as_deref()
                .map(|flag| flag.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            category: non_empty(self.category_name)
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or_zero<T>(value: Option<&str>) -> T
where
    T: std::str::FromStr + Default,
{
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or_default()
}

/// Like [`parse_or_zero`], but `NaN` and infinities also become zero.
fn parse_float(value: Option<&str>) -> f64 {
    let parsed: f64 = parse_or_zero(value);
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Outcome of one catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// CSV records seen, including malformed and invalid ones.
    pub rows_read: usize,
    /// Records dropped as malformed or missing required fields.
    pub rows_skipped: usize,
    pub batches_uploaded: usize,
    pub batches_failed: usize,
    pub products_uploaded: usize,
    pub products_failed: usize,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.batches_failed == 0
    }
}
