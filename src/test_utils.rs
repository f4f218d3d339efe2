//! Shared test doubles for the translation, search and ingestion tests.

use crate::search::index::ProductIndex;
use crate::search::types::{Product, SearchEnvelope, SearchQuery};
use crate::translation::client::QueryTranslator;

use async_trait::async_trait;
use axum::Router;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve_fake(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn sample_product(id: usize) -> Product {
    Product {
        object_id: format!("B{:09}", id),
        title: format!("Product {}", id),
        image: format!("https://img.example.com/{}.jpg", id),
        link: format!("https://shop.example.com/dp/{}", id),
        stars: 4.5,
        reviews: 120,
        price: 19.99,
        is_best_seller: false,
        category: "Kitchen".to_string(),
    }
}

/// Translator that always answers with the same reply (or error) and counts calls.
pub struct ScriptedTranslator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl ScriptedTranslator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryTranslator for ScriptedTranslator {
    async fn translate(&self, query: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(error) => Err(anyhow::anyhow!(error.clone())),
        }
    }
}

/// In-memory index that records every call.
///
/// Searches paginate over `total_hits` generated products. Batch uploads whose 1-based
/// sequence number is in `failing_batches` return an error.
pub struct RecordingIndex {
    total_hits: usize,
    fail_search: bool,
    failing_batches: HashSet<usize>,
    searches: Mutex<Vec<SearchQuery>>,
    batches: Mutex<Vec<Vec<Product>>>,
    batch_attempts: AtomicUsize,
}

impl RecordingIndex {
    pub fn with_hits(total_hits: usize) -> Self {
        Self {
            total_hits,
            fail_search: false,
            failing_batches: HashSet::new(),
            searches: Mutex::new(Vec::new()),
            batches: Mutex::new(Vec::new()),
            batch_attempts: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fail_search: true,
            ..Self::with_hits(0)
        }
    }

    pub fn failing_batches(batches: &[usize]) -> Self {
        Self {
            failing_batches: batches.iter().copied().collect(),
            ..Self::with_hits(0)
        }
    }

    pub fn searches(&self) -> Vec<SearchQuery> {
        self.searches.lock().unwrap().clone()
    }

    /// Successfully saved batches, in upload order.
    pub fn batches(&self) -> Vec<Vec<Product>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches().iter().map(|batch| batch.len()).collect()
    }

    pub fn batch_attempts(&self) -> usize {
        self.batch_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductIndex for RecordingIndex {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<SearchEnvelope> {
        self.searches.lock().unwrap().push(query.clone());
        if self.fail_search {
            anyhow::bail!("index unavailable: 403 invalid API key");
        }

        let per_page = query.hits_per_page.max(1) as usize;
        let start = query.page as usize * per_page;
        let end = (start + per_page).min(self.total_hits);
        let hits = (start..end.max(start)).map(sample_product).collect();

        Ok(SearchEnvelope {
            hits,
            nb_hits: self.total_hits as u64,
            page: query.page,
            nb_pages: self.total_hits.div_ceil(per_page) as u32,
        })
    }

    async fn save_objects(&self, products: &[Product]) -> anyhow::Result<()> {
        let attempt = self.batch_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_batches.contains(&attempt) {
            anyhow::bail!("batch {} rejected", attempt);
        }
        self.batches.lock().unwrap().push(products.to_vec());
        Ok(())
    }
}
