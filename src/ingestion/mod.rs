//! Ingestion Service Module
//!
//! Loads a CSV product catalog into the search index.
//!
//! ## Workflow
//! 1. **Read**: A blocking thread decodes CSV records one at a time and hands them over a
//!    bounded channel, so the file is never held in memory.
//! 2. **Validate**: Rows without a title, image URL, product URL or ASIN are dropped.
//! 3. **Batch**: Valid products accumulate until the batch size is reached.
//! 4. **Upload**: Each full batch is written to the index and awaited before more rows are
//!    consumed. The trailing partial batch is written once the file is exhausted.
//!
//! A failed batch is logged and counted; the load carries on with the next one.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;
