//! Search Index Protocol
//!
//! Endpoints, headers and Data Transfer Objects for the Algolia REST API.
//! Searches go to the DSN (read replica) host, writes to the primary host.

use super::types::{Product, SearchEnvelope};
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Search endpoint, relative to `/1/indexes/{index}`.
pub const ENDPOINT_QUERY: &str = "query";
/// Batch write endpoint, relative to `/1/indexes/{index}`.
pub const ENDPOINT_BATCH: &str = "batch";

pub const HEADER_APPLICATION_ID: &str = "X-Algolia-Application-Id";
pub const HEADER_API_KEY: &str = "X-Algolia-API-Key";

/// Batch action that creates or fully replaces a record by `objectID`.
pub const ACTION_UPDATE_OBJECT: &str = "updateObject";

pub fn default_search_host(app_id: &str) -> String {
    format!("https://{}-dsn.algolia.net", app_id)
}

pub fn default_write_host(app_id: &str) -> String {
    format!("https://{}.algolia.net", app_id)
}

// --- Data Transfer Objects ---

/// Body of a search request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    pub page: u32,
    pub hits_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<&'a str>,
}

/// The subset of the search response this service forwards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub hits: Vec<Product>,
    pub nb_hits: u64,
    pub page: u32,
    pub nb_pages: u32,
}

impl From<QueryResponse> for SearchEnvelope {
    fn from(response: QueryResponse) -> Self {
        SearchEnvelope {
            hits: response.hits,
            nb_hits: response.nb_hits,
            page: response.page,
            nb_pages: response.nb_pages,
        }
    }
}

/// Body of a batch write request.
#[derive(Debug, Serialize)]
pub struct BatchRequest<'a> {
    pub requests: Vec<BatchOperation<'a>>,
}

#[derive(Debug, Serialize)]
pub struct BatchOperation<'a> {
    pub action: &'static str,
    pub body: &'a Product,
}

impl<'a> BatchRequest<'a> {
    pub fn update_objects(products: &'a [Product]) -> Self {
        Self {
            requests: products
                .iter()
                .map(|product| BatchOperation {
                    action: ACTION_UPDATE_OBJECT,
                    body: product,
                })
                .collect(),
        }
    }
}
