//! Catalog Loader
//!
//! Streams a CSV catalog into a [`ProductIndex`].
//!
//! The CSV decoder runs on a blocking thread and feeds a bounded channel. A single async
//! consumer owns the [`BatchAccumulator`] and awaits every upload before it receives the
//! next row, so at most one batch is in flight and the final partial batch is only
//! flushed after all earlier batches have completed.

use super::types::{CatalogRow, IngestReport};
use crate::search::index::ProductIndex;
use crate::search::types::Product;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tokio::sync::mpsc;

/// Products per upload request.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Decoded rows buffered between the reader thread and the uploader.
const ROW_CHANNEL_CAPACITY: usize = 256;

/// Batch buffer plus running totals for one load.
pub struct BatchAccumulator {
    batch_size: usize,
    pending: Vec<Product>,
    report: IngestReport,
}

impl BatchAccumulator {
    pub fn new(batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            batch_size,
            pending: Vec::with_capacity(batch_size),
            report: IngestReport::default(),
        }
    }

    /// Validates one row. Returns a full batch when the threshold is reached.
    pub fn accept(&mut self, row: CatalogRow) -> Option<Vec<Product>> {
        self.report.rows_read += 1;

        let Some(product) = row.into_product() else {
            self.report.rows_skipped += 1;
            tracing::debug!(
                "Skipping row {}: missing required field",
                self.report.rows_read
            );
            return None;
        };

        self.pending.push(product);
        if self.pending.len() >= self.batch_size {
            Some(self.take_pending())
        } else {
            None
        }
    }

    /// Counts a record the CSV decoder could not read.
    pub fn reject_malformed(&mut self) {
        self.report.rows_read += 1;
        self.report.rows_skipped += 1;
    }

    /// Drains whatever is left once the input is exhausted.
    pub fn finish(&mut self) -> Option<Vec<Product>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take_pending())
        }
    }

    /// Uploads one batch and records the outcome. Failures are logged, not returned.
    pub async fn upload(&mut self, index: &dyn ProductIndex, batch: Vec<Product>) {
        let size = batch.len();
        match index.save_objects(&batch).await {
            Ok(()) => {
                self.report.batches_uploaded += 1;
                self.report.products_uploaded += size;
                tracing::info!(
                    "Uploaded {} products so far...",
                    self.report.products_uploaded
                );
            }
            Err(err) => {
                self.report.batches_failed += 1;
                self.report.products_failed += size;
                tracing::error!("Error uploading batch of {} products: {:#}", size, err);
            }
        }
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    pub fn into_report(self) -> IngestReport {
        self.report
    }

    fn take_pending(&mut self) -> Vec<Product> {
        std::mem::replace(&mut self.pending, Vec::with_capacity(self.batch_size))
    }
}

/// Decodes one record against the header row. Records shorter than the header are
/// padded with empty fields, so missing trailing columns read as absent.
pub fn decode_row(
    mut record: csv::StringRecord,
    headers: &csv::StringRecord,
) -> csv::Result<CatalogRow> {
    while record.len() < headers.len() {
        record.push_field("");
    }
    record.deserialize(Some(headers))
}

/// Loads the CSV file at `path`. Fails only if the file cannot be opened.
pub async fn load_catalog(
    path: &Path,
    index: &dyn ProductIndex,
    batch_size: usize,
) -> Result<IngestReport> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open catalog file {}", path.display()))?;

    tracing::info!("Loading catalog from {}", path.display());
    load_from_reader(file, index, batch_size).await
}

/// Loads CSV data from any reader. The reader is consumed on a blocking thread.
pub async fn load_from_reader<R>(
    reader: R,
    index: &dyn ProductIndex,
    batch_size: usize,
) -> Result<IngestReport>
where
    R: Read + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<csv::Result<CatalogRow>>(ROW_CHANNEL_CAPACITY);

    let producer = tokio::task::spawn_blocking(move || {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = match csv_reader.headers() {
            Ok(headers) => headers.clone(),
            Err(err) => {
                let _ = tx.blocking_send(Err(err));
                return;
            }
        };

        for record in csv_reader.records() {
            let row = record.and_then(|record| decode_row(record, &headers));
            if tx.blocking_send(row).is_err() {
                // Consumer is gone; nothing left to do.
                break;
            }
        }
    });

    let mut accumulator = BatchAccumulator::new(batch_size);

    while let Some(record) = rx.recv().await {
        match record {
            Ok(row) => {
                if let Some(batch) = accumulator.accept(row) {
                    accumulator.upload(index, batch).await;
                }
            }
            Err(err) => {
                tracing::warn!("Skipping malformed CSV record: {}", err);
                accumulator.reject_malformed();
            }
        }
    }

    producer.await.context("CSV reader thread panicked")?;

    if let Some(batch) = accumulator.finish() {
        accumulator.upload(index, batch).await;
    }

    let report = accumulator.into_report();
    tracing::info!(
        "Catalog load finished: {} rows read, {} skipped, {} products uploaded in {} batches, {} batches failed",
        report.rows_read,
        report.rows_skipped,
        report.products_uploaded,
        report.batches_uploaded,
        report.batches_failed
    );

    Ok(report)
}
