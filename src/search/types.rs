use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry, as stored in the index and returned to API callers.
///
/// Field names on the wire are the index's record attributes (`objectID`, `isBestSeller`,
/// ...). Everything except the key has a default, and `null` reads as that default, so
/// a sparse record from the index does not fail a whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stars: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(rename = "isBestSeller", default, deserialize_with = "null_as_default")]
    pub is_best_seller: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Everything the index needs to answer one page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub keywords: String,
    /// Compiled filter expression; `None` means unfiltered.
    pub filters: Option<String>,
    /// Zero-based page index.
    pub page: u32,
    pub hits_per_page: u32,
}

/// Response body of `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEnvelope {
    pub hits: Vec<Product>,
    pub nb_hits: u64,
    pub page: u32,
    pub nb_pages: u32,
}

/// Body returned with any 5xx from the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
