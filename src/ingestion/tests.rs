//! Ingestion Module Tests
//!
//! Validates row mapping, batching and the streaming load.
//!
//! ## Test Scopes
//! - **Row Mapping**: Required fields, defaults and flag parsing.
//! - **Accumulator**: Threshold flushing and the trailing partial batch.
//! - **Streaming Load**: Batch counts, invalid rows and failed uploads end to end.

#[cfg(test)]
mod tests {
    use crate::ingestion::loader::{decode_row, load_catalog, load_from_reader, BatchAccumulator};
    use crate::ingestion::types::{CatalogRow, IngestReport, FALLBACK_CATEGORY};
    use crate::test_utils::RecordingIndex;

    use std::fmt::Write as _;
    use std::io::{Cursor, Write};

    const HEADER: &str =
        "asin,title,imgUrl,productURL,stars,reviews,price,isBestSeller,boughtInLastMonth,categoryName";

    fn valid_line(i: usize) -> String {
        format!(
            "B{:09},Product {},https://img.example.com/{}.jpg,https://shop.example.com/dp/{},4.5,{},{}.99,False,50,Kitchen",
            i, i, i, i, i, i
        )
    }

    fn csv_with_rows(count: usize) -> String {
        let mut csv = String::from(HEADER);
        csv.push('\n');
        for i in 0..count {
            writeln!(csv, "{}", valid_line(i)).unwrap();
        }
        csv
    }

    fn row(asin: &str, title: &str, img: &str, url: &str) -> CatalogRow {
        CatalogRow {
            asin: Some(asin.to_string()),
            title: Some(title.to_string()),
            img_url: Some(img.to_string()),
            product_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    // ============================================================
    // ROW MAPPING TESTS
    // ============================================================

    #[test]
    fn test_row_maps_all_fields() {
        let product = CatalogRow {
            stars: Some("4.7".to_string()),
            reviews: Some("15308".to_string()),
            price: Some("21.99".to_string()),
            is_best_seller: Some("TRUE".to_string()),
            category_name: Some("Hi-Fi Speakers".to_string()),
            ..row("B09B96TG33", "Echo Dot", "https://img/1.jpg", "https://amazon/dp/1")
        }
        .into_product()
        .unwrap();

        assert_eq!(product.object_id, "B09B96TG33");
        assert_eq!(product.title, "Echo Dot");
        assert_eq!(product.image, "https://img/1.jpg");
        assert_eq!(product.link, "https://amazon/dp/1");
        assert_eq!(product.stars, 4.7);
        assert_eq!(product.reviews, 15308);
        assert_eq!(product.price, 21.99);
        assert!(product.is_best_seller);
        assert_eq!(product.category, "Hi-Fi Speakers");
    }

    #[test]
    fn test_row_defaults_for_optional_fields() {
        let product = CatalogRow {
            stars: Some("n/a".to_string()),
            price: Some("NaN".to_string()),
            is_best_seller: Some("False".to_string()),
            ..row("A1", "Mug", "https://img/2.jpg", "https://amazon/dp/2")
        }
        .into_product()
        .unwrap();

        assert_eq!(product.stars, 0.0);
        assert_eq!(product.reviews, 0);
        assert_eq!(product.price, 0.0);
        assert!(!product.is_best_seller);
        assert_eq!(product.category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_row_missing_required_fields_is_rejected() {
        let base = row("A1", "Mug", "https://img/2.jpg", "https://amazon/dp/2");

        let no_image = CatalogRow {
            img_url: None,
            ..base.clone()
        };
        let blank_title = CatalogRow {
            title: Some("   ".to_string()),
            ..base.clone()
        };
        let no_url = CatalogRow {
            product_url: Some(String::new()),
            ..base.clone()
        };
        let no_asin = CatalogRow {
            asin: None,
            ..base.clone()
        };

        assert!(base.into_product().is_some());
        assert!(no_image.into_product().is_none());
        assert!(blank_title.into_product().is_none());
        assert!(no_url.into_product().is_none());
        assert!(no_asin.into_product().is_none());
    }

    #[test]
    fn test_short_record_pads_missing_columns() {
        let headers = csv::StringRecord::from(HEADER.split(',').collect::<Vec<_>>());
        let record = csv::StringRecord::from(vec![
            "S1",
            "Short Row",
            "https://img/s1.jpg",
            "https://shop/s1",
        ]);

        let row = decode_row(record, &headers).unwrap();

        assert_eq!(row.asin.as_deref(), Some("S1"));
        assert_eq!(row.product_url.as_deref(), Some("https://shop/s1"));
        assert_eq!(row.stars, None);
        assert_eq!(row.category_name, None);

        let product = row.into_product().unwrap();
        assert_eq!(product.price, 0.0);
        assert_eq!(product.category, FALLBACK_CATEGORY);
    }

    // ============================================================
    // ACCUMULATOR TESTS
    // ============================================================

    #[test]
    fn test_accumulator_flushes_at_threshold() {
        let mut accumulator = BatchAccumulator::new(3);

        assert!(accumulator.accept(row("1", "a", "i", "u")).is_none());
        assert!(accumulator.accept(row("2", "b", "i", "u")).is_none());
        let batch = accumulator.accept(row("3", "c", "i", "u")).unwrap();
        assert_eq!(batch.len(), 3);

        assert!(accumulator.accept(row("4", "d", "i", "u")).is_none());
        let rest = accumulator.finish().unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].object_id, "4");

        assert!(accumulator.finish().is_none());
    }

    #[test]
    fn test_accumulator_counts_skipped_rows() {
        let mut accumulator = BatchAccumulator::new(10);

        accumulator.accept(row("1", "a", "i", "u"));
        accumulator.accept(row("2", "b", "", "u"));
        accumulator.reject_malformed();

        assert_eq!(accumulator.report().rows_read, 3);
        assert_eq!(accumulator.report().rows_skipped, 2);
    }

    #[test]
    fn test_accumulator_zero_batch_size_is_clamped() {
        let mut accumulator = BatchAccumulator::new(0);
        let batch = accumulator.accept(row("1", "a", "i", "u"));
        assert_eq!(batch.map(|b| b.len()), Some(1));
    }

    // ============================================================
    // STREAMING LOAD TESTS
    // ============================================================

    #[tokio::test]
    async fn test_load_2500_rows_makes_three_uploads() {
        let index = RecordingIndex::with_hits(0);
        let csv = csv_with_rows(2500);

        let report = load_from_reader(Cursor::new(csv.into_bytes()), &index, 1000)
            .await
            .unwrap();

        assert_eq!(index.batch_attempts(), 3);
        assert_eq!(index.batch_sizes(), vec![1000, 1000, 500]);
        assert_eq!(
            report,
            IngestReport {
                rows_read: 2500,
                rows_skipped: 0,
                batches_uploaded: 3,
                batches_failed: 0,
                products_uploaded: 2500,
                products_failed: 0,
            }
        );
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn test_load_preserves_row_order_across_batches() {
        let index = RecordingIndex::with_hits(0);
        let csv = csv_with_rows(7);

        load_from_reader(Cursor::new(csv.into_bytes()), &index, 3)
            .await
            .unwrap();

        let ids: Vec<String> = index
            .batches()
            .into_iter()
            .flatten()
            .map(|p| p.object_id)
            .collect();
        let expected: Vec<String> = (0..7).map(|i| format!("B{:09}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_load_excludes_row_without_image() {
        let index = RecordingIndex::with_hits(0);
        let mut csv = csv_with_rows(2);
        csv.push_str("NOIMG00001,No Image,,https://shop.example.com/dp/x,5,1,9.99,False,0,Kitchen\n");
        writeln!(csv, "{}", valid_line(2)).unwrap();

        let report = load_from_reader(Cursor::new(csv.into_bytes()), &index, 1000)
            .await
            .unwrap();

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.products_uploaded, 3);

        let uploaded_ids: Vec<String> = index
            .batches()
            .into_iter()
            .flatten()
            .map(|p| p.object_id)
            .collect();
        assert!(!uploaded_ids.contains(&"NOIMG00001".to_string()));
    }

    #[tokio::test]
    async fn test_load_continues_after_failed_batch() {
        let index = RecordingIndex::failing_batches(&[2]);
        let csv = csv_with_rows(25);

        let report = load_from_reader(Cursor::new(csv.into_bytes()), &index, 10)
            .await
            .unwrap();

        assert_eq!(index.batch_attempts(), 3);
        assert_eq!(index.batch_sizes(), vec![10, 5]);
        assert_eq!(report.batches_uploaded, 2);
        assert_eq!(report.batches_failed, 1);
        assert_eq!(report.products_uploaded, 15);
        assert_eq!(report.products_failed, 10);
        assert!(!report.is_complete());
    }

    #[tokio::test]
    async fn test_load_header_only_uploads_nothing() {
        let index = RecordingIndex::with_hits(0);

        let report = load_from_reader(Cursor::new(format!("{}\n", HEADER).into_bytes()), &index, 1000)
            .await
            .unwrap();

        assert_eq!(index.batch_attempts(), 0);
        assert_eq!(report, IngestReport::default());
    }

    #[tokio::test]
    async fn test_load_handles_quoted_fields_and_short_rows() {
        let index = RecordingIndex::with_hits(0);
        let csv = format!(
            "{}\n{}\n{}\n",
            HEADER,
            r#"Q1,"Knife Set, 15 pieces",https://img/q1.jpg,https://shop/q1,4.8,77,"39.99",TRUE,10,"Kitchen, Dining""#,
            "S1,Short Row,https://img/s1.jpg,https://shop/s1"
        );

        let report = load_from_reader(Cursor::new(csv.into_bytes()), &index, 1000)
            .await
            .unwrap();

        assert_eq!(report.products_uploaded, 2);
        let products: Vec<_> = index.batches().into_iter().flatten().collect();
        assert_eq!(products[0].title, "Knife Set, 15 pieces");
        assert_eq!(products[0].category, "Kitchen, Dining");
        assert!(products[0].is_best_seller);
        assert_eq!(products[1].object_id, "S1");
        assert_eq!(products[1].category, FALLBACK_CATEGORY);
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let index = RecordingIndex::with_hits(0);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv_with_rows(12).as_bytes()).unwrap();
        file.flush().unwrap();

        let report = load_catalog(file.path(), &index, 5).await.unwrap();

        assert_eq!(report.products_uploaded, 12);
        assert_eq!(index.batch_sizes(), vec![5, 5, 2]);
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file_fails() {
        let index = RecordingIndex::with_hits(0);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does_not_exist.csv");

        let err = load_catalog(&missing, &index, 1000).await.unwrap_err();

        assert!(err.to_string().contains("does_not_exist.csv"));
        assert_eq!(index.batch_attempts(), 0);
    }
}
