//! Query Translation Module
//!
//! Turns a raw, free-text user query into something the search index understands.
//!
//! ## Overview
//! Users type queries in Hebrew or English, often as full sentences
//! ("cheap garden chairs with at least 4 stars"). The catalog is stored in English and the
//! index only does keyword matching, so the query is first sent to a hosted language model
//! which translates it and extracts:
//! - **Keywords**: 2-5 broad English search terms.
//! - **Filters**: optional rating/price bounds and category names.
//!
//! ## Failure Model
//! Translation is best-effort. Very short queries skip the model entirely, and any
//! network, provider or parsing problem falls back to searching the literal query text.
//! A search request never fails because of this layer.
//!
//! ## Submodules
//! - **`normalizer`**: Short-circuit rules, response parsing and fallback.
//! - **`client`**: The `QueryTranslator` seam and its Groq chat-completions implementation.
//! - **`prompt`**: The fixed system instruction sent with every query.
//! - **`protocol`**: Wire types for the chat-completions API.
//! - **`types`**: The parsed filter set and normalized query.

pub mod client;
pub mod normalizer;
pub mod prompt;
pub mod protocol;
pub mod types;
