//! Search Service Module
//!
//! The serving path behind `GET /api/products`.
//!
//! ## Overview
//! Ranking, relevance and pagination all happen inside the hosted search index (Algolia).
//! This module only prepares the request and reshapes the reply:
//! 1. **Normalize**: the raw query goes through the `translation` layer.
//! 2. **Compile**: the extracted filter set becomes an Algolia `filters` expression.
//! 3. **Query**: keywords, filters, page and page size are sent to the index.
//! 4. **Respond**: hits and pagination counters are returned in a stable envelope.
//!
//! ## Submodules
//! - **`filter`**: Filter set to filter-expression compilation.
//! - **`index`**: The `ProductIndex` seam and its Algolia REST implementation.
//! - **`handlers`**: Axum router, application state and the products handler.
//! - **`protocol`**: Wire types for the Algolia REST API.
//! - **`types`**: Product record, search query and response envelope.

pub mod filter;
pub mod handlers;
pub mod index;
pub mod protocol;
pub mod types;
