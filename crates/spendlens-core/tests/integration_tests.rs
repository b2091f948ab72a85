//! Integration tests for spendlens-core
//!
//! These tests exercise the client ↔ server wire contract against the mock
//! receipts server: which query parameters actually leave the client, how
//! mutations flow, and how server errors surface.

use chrono::{NaiveDate, TimeZone, Utc};

use spendlens_core::models::{Statistics, VendorSpend};
use spendlens_core::test_utils::MockReceiptServer;
use spendlens_core::{
    AnalyticsSnapshot, Category, Error, ExportFormat, ExtractionResult, FilterState, FilterSession,
    Receipt, ReceiptClient, ReceiptUpdate, SortBy,
};

fn sample_receipt(id: i64, vendor: &str, amount: f64, date: &str, category: Category) -> Receipt {
    Receipt {
        id,
        vendor: vendor.to_string(),
        amount,
        transaction_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category,
        confidence_score: 0.9,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
    }
}

fn seeded_server_receipts() -> Vec<Receipt> {
    vec![
        sample_receipt(1, "DMart", 450.0, "2024-02-01", Category::Groceries),
        sample_receipt(2, "Swiggy", 320.0, "2024-02-03", Category::Restaurant),
        sample_receipt(3, "Airtel", 799.0, "2024-02-05", Category::Internet),
    ]
}

// =============================================================================
// Filter/query contract
// =============================================================================

#[tokio::test]
async fn test_list_sends_only_non_empty_params() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    let filters = FilterState::new()
        .search("mart")
        .category(Some(Category::Groceries))
        .min_amount("100.50")
        .sort_by(Some(SortBy::newest_first()));

    let receipts = client.list_receipts(&filters).await.unwrap();
    assert_eq!(receipts.len(), 3);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/receipts/");
    assert_eq!(
        requests[0].query,
        vec![
            ("search".to_string(), "mart".to_string()),
            ("category".to_string(), "groceries".to_string()),
            ("min_amount".to_string(), "100.50".to_string()),
            ("sort_by".to_string(), "-transaction_date".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_cleared_filters_fetch_with_no_parameters() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    let mut session = FilterSession::with_filters(
        FilterState::new()
            .search("airtel")
            .start_date("2024-01-01")
            .sort_by(Some(SortBy::newest_first())),
    );
    session.clear();

    let outcome = session.fetch(&client).await.unwrap();
    assert!(outcome.into_receipts().is_some());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn test_unrecognized_sort_key_relayed_verbatim() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    // The dashboard's recent panel sorts on a key the closed enum does not
    // know; the server decides what it means.
    let filters = FilterState::new()
        .sort_by(Some(SortBy::parse("-created_at")))
        .limit(Some(5));
    client.list_receipts(&filters).await.unwrap();

    let requests = server.requests();
    assert_eq!(
        requests[0].query,
        vec![
            ("sort_by".to_string(), "-created_at".to_string()),
            ("limit".to_string(), "5".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_session_fetch_returns_fresh_when_unchanged() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    let session = FilterSession::new();
    let receipts = session.fetch(&client).await.unwrap().into_receipts().unwrap();
    assert_eq!(receipts.len(), 3);
}

// =============================================================================
// Mutating flows
// =============================================================================

#[tokio::test]
async fn test_upload_sends_single_multipart_file_field() {
    let server = MockReceiptServer::start().await;
    server.set_extraction(ExtractionResult {
        vendor: "Big Bazaar".to_string(),
        amount: 1250.0,
        transaction_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        category: Category::Shopping,
        confidence_score: 0.87,
    });
    let client = ReceiptClient::new(&server.url());

    let result = client
        .upload_receipt("bill.pdf", b"%PDF-1.4 fake receipt".to_vec())
        .await
        .unwrap();

    assert_eq!(result.vendor, "Big Bazaar");
    assert_eq!(result.amount, 1250.0);
    assert_eq!(result.category, Category::Shopping);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/receipts/upload/");
}

#[tokio::test]
async fn test_upload_failure_surfaces_server_message() {
    let server = MockReceiptServer::start().await;
    server.set_error(Some("Unsupported file type"));
    let client = ReceiptClient::new(&server.url());

    let err = client
        .upload_receipt("notes.docx", b"not a receipt".to_vec())
        .await
        .unwrap_err();

    match err {
        Error::Api(message) => assert_eq!(message, "Unsupported file type"),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_patches_only_provided_fields() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    let update = ReceiptUpdate {
        vendor: Some("DMart Hypermarket".to_string()),
        ..Default::default()
    };
    let updated = client.update_receipt(1, &update).await.unwrap();

    assert_eq!(updated.vendor, "DMart Hypermarket");
    // Untouched fields survive the partial update.
    assert_eq!(updated.amount, 450.0);
    assert_eq!(updated.category, Category::Groceries);

    let requests = server.requests();
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/receipts/1/");
}

#[tokio::test]
async fn test_delete_removes_receipt() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    client.delete_receipt(2).await.unwrap();

    let remaining = client.list_receipts(&FilterState::new()).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|r| r.id != 2));
}

#[tokio::test]
async fn test_delete_failure_surfaces_structured_error() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    server.set_error(Some("Receipt is locked"));
    let client = ReceiptClient::new(&server.url());

    let err = client.delete_receipt(1).await.unwrap_err();
    match err {
        Error::Api(message) => assert_eq!(message, "Receipt is locked"),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_missing_receipt_is_not_found() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    let err = client.get_receipt(99).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// =============================================================================
// Analytics and export
// =============================================================================

#[tokio::test]
async fn test_analytics_relays_filter_params() {
    let server = MockReceiptServer::start().await;
    server.set_analytics(AnalyticsSnapshot {
        statistics: Statistics {
            count: 3,
            total_spend: 1569.0,
            ..Default::default()
        },
        top_vendors: vec![VendorSpend {
            vendor: "Airtel".to_string(),
            total_spend: 799.0,
        }],
        ..Default::default()
    });
    let client = ReceiptClient::new(&server.url());

    let filters = FilterState::new().start_date("2024-02-01").end_date("2024-02-29");
    let snapshot = client.analytics(&filters).await.unwrap();

    assert!(!snapshot.is_empty());
    assert_eq!(snapshot.statistics.count, 3);

    let requests = server.requests();
    assert_eq!(requests[0].path, "/receipts/analytics/");
    assert_eq!(
        requests[0].query,
        vec![
            ("start_date".to_string(), "2024-02-01".to_string()),
            ("end_date".to_string(), "2024-02-29".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_export_sends_format_and_filters() {
    let server = MockReceiptServer::start().await;
    server.seed_receipts(seeded_server_receipts());
    let client = ReceiptClient::new(&server.url());

    let filters = FilterState::new().category(Some(Category::Internet));
    let data = client.export(ExportFormat::Csv, &filters).await.unwrap();

    let body = String::from_utf8(data).unwrap();
    assert!(body.starts_with("Vendor,Date,Amount,Category,Created"));

    let requests = server.requests();
    assert_eq!(requests[0].path, "/receipts/export/");
    assert_eq!(
        requests[0].query,
        vec![
            ("format".to_string(), "csv".to_string()),
            ("category".to_string(), "internet".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_read_failure_leaves_caller_with_error_not_panic() {
    let server = MockReceiptServer::start().await;
    server.set_error(Some("Database unavailable"));
    let client = ReceiptClient::new(&server.url());

    assert!(client.list_receipts(&FilterState::new()).await.is_err());
    assert!(client.analytics(&FilterState::new()).await.is_err());
}
