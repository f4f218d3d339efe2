//! Search Index Client
//!
//! `ProductIndex` is shared by the serving path (`search`) and the catalog loader
//! (`save_objects`). `AlgoliaIndex` talks to the hosted index over its REST API using a
//! single pooled `reqwest::Client`.
//!
//! No retries are attempted here: a failed search fails the request, a failed batch is
//! reported to the loader.

use super::protocol::{
    default_search_host, default_write_host, BatchRequest, QueryRequest, QueryResponse,
    ENDPOINT_BATCH, ENDPOINT_QUERY, HEADER_API_KEY, HEADER_APPLICATION_ID,
};
use super::types::{Product, SearchEnvelope, SearchQuery};

use anyhow::{Context, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ProductIndex: Send + Sync {
    /// Runs one paginated search.
    async fn search(&self, query: &SearchQuery) -> Result<SearchEnvelope>;

    /// Creates or replaces the given records, keyed by `objectID`.
    async fn save_objects(&self, products: &[Product]) -> Result<()>;
}

pub struct AlgoliaIndex {
    app_id: String,
    api_key: String,
    index_name: String,
    search_host: String,
    write_host: String,
    http_client: reqwest::Client,
}

impl AlgoliaIndex {
    /// `api_key` must be a search key for serving and an admin key for loading.
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        let app_id = app_id.into();
        Self {
            search_host: default_search_host(&app_id),
            write_host: default_write_host(&app_id),
            app_id,
            api_key: api_key.into(),
            index_name: index_name.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Overrides both hosts, e.g. to target a local fake.
    pub fn with_hosts(mut self, search_host: impl Into<String>, write_host: impl Into<String>) -> Self {
        self.search_host = search_host.into();
        self.write_host = write_host.into();
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    fn index_url(&self, host: &str, endpoint: &str) -> String {
        format!(
            "{}/1/indexes/{}/{}",
            host.trim_end_matches('/'),
            urlencoding::encode(&self.index_name),
            endpoint
        )
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(&url)
            .header(HEADER_APPLICATION_ID, &self.app_id)
            .header(HEADER_API_KEY, &self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Search index returned {}: {}", status, error_text);
        }

        Ok(response)
    }
}

#[async_trait]
impl ProductIndex for AlgoliaIndex {
    async fn search(&self, query: &SearchQuery) -> Result<SearchEnvelope> {
        let body = QueryRequest {
            query: &query.keywords,
            page: query.page,
            hits_per_page: query.hits_per_page,
            filters: query.filters.as_deref(),
        };

        tracing::debug!(
            "Searching {} for {:?} (filters: {:?}, page {}, {} per page)",
            self.index_name,
            query.keywords,
            query.filters,
            query.page,
            query.hits_per_page
        );

        let response = self
            .post(self.index_url(&self.search_host, ENDPOINT_QUERY), &body)
            .await?;

        let decoded: QueryResponse = response
            .json()
            .await
            .context("Search index returned an unexpected response body")?;

        Ok(decoded.into())
    }

    async fn save_objects(&self, products: &[Product]) -> Result<()> {
        if products.is_empty() {
            return Ok(());
        }

        let body = BatchRequest::update_objects(products);
        self.post(self.index_url(&self.write_host, ENDPOINT_BATCH), &body)
            .await?;

        tracing::debug!(
            "Saved {} objects to index {}",
            products.len(),
            self.index_name
        );
        Ok(())
    }
}
