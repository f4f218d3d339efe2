//! Natural-Language Product Search Library
//!
//! This library crate defines the modules shared by the search backend (`main.rs`)
//! and the catalog loader (`bin/upload_products.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three loosely coupled subsystems:
//!
//! - **`translation`**: The query normalization layer. Sends free-text (Hebrew or English)
//!   queries to a hosted language model and parses the reply into keywords and filters.
//!   Any failure degrades to a literal-text search.
//! - **`search`**: The serving path. Compiles filters into the index's filter syntax,
//!   talks to the hosted search index, and exposes the `/api/products` endpoint.
//! - **`ingestion`**: The offline catalog pipeline. Streams a CSV file, validates rows,
//!   and uploads them to the index in fixed-size batches.
//!
//! Environment-driven settings for both binaries live in **`config`**.

pub mod config;
pub mod ingestion;
pub mod search;
pub mod translation;

#[cfg(test)]
pub(crate) mod test_utils;
