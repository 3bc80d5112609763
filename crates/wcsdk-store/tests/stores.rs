//! End-to-end tests for the domain stores: wiremock stands in for the site,
//! and each test gets a private in-memory database.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use wcsdk_api::WooClient;
use wcsdk_core::{
    AddressType, AddressVerificationResult, GenericErrorType, ShippingLabelAddress, Site,
    SiteSystemStatus, StatsGranularity, WooErrorType,
};
use wcsdk_store::{Stores, TaskEngine};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup(server: &MockServer) -> (Stores, Site, sqlx::SqlitePool) {
    let pool = wcsdk_db::connect_in_memory()
        .await
        .expect("in-memory database should open");
    let client = WooClient::new(5, "wcsdk-test/0.1").expect("client should build");
    let stores = Stores::new(Arc::new(client), pool.clone(), TaskEngine::current());
    (stores, Site::new(321, server.uri()), pool)
}

fn label_item(label_id: i64) -> serde_json::Value {
    json!({
        "label_id": label_id,
        "tracking": format!("TRACK-{label_id}"),
        "refundable_amount": 7.5,
        "created": 1_604_847_089_000_i64,
        "carrier_id": "usps",
        "service_name": "USPS - Priority Mail",
        "status": "PURCHASED",
        "package_name": "Small Flat Rate Box",
        "product_names": ["Beanie"],
        "product_ids": [17],
        "rate": 7.5,
        "currency": "USD"
    })
}

async fn mount_labels(server: &MockServer, order_id: i64, items: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/wp-json/wc/v1/connect/label/{order_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orderId": order_id,
            "paperSize": "label",
            "formData": {
                "origin": { "name": "Store", "address_1": "1 Main St" },
                "destination": { "name": "Buyer", "address_1": "2 Oak Ave" }
            },
            "storeOptions": { "currency_symbol": "$" },
            "labelsData": items
        })))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Shipping labels
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_replaces_cached_labels_for_the_order() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let labels = &stores.shipping_labels;

    mount_labels(&server, 25, vec![label_item(1), label_item(2)]).await;
    let first = labels
        .fetch_shipping_labels_for_order(&site, 25)
        .await
        .expect("first fetch should succeed");
    assert_eq!(first.len(), 2);

    mount_labels(&server, 25, vec![label_item(3)]).await;
    let second = labels
        .fetch_shipping_labels_for_order(&site, 25)
        .await
        .expect("second fetch should succeed");
    assert_eq!(second.len(), 1);

    let cached = labels.get_shipping_labels_for_order(&site, 25).await.unwrap();
    assert_eq!(cached, second);
    assert!(labels
        .get_shipping_label_by_id(&site, 25, 1)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn fetched_labels_read_back_field_for_field() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let labels = &stores.shipping_labels;

    mount_labels(&server, 25, vec![label_item(7), json!({ "label_id": 8 })]).await;
    let fetched = labels
        .fetch_shipping_labels_for_order(&site, 25)
        .await
        .unwrap();

    let stored = labels
        .get_shipping_label_by_id(&site, 25, 8)
        .await
        .unwrap()
        .expect("label 8 should be cached");
    assert_eq!(stored, fetched[1]);
    assert!(stored.tracking_number.is_none());
    assert!(stored.rate.is_none());
    assert_eq!(stored.paper_size.as_deref(), Some("label"));
    assert_eq!(
        stored.destination_address().and_then(|a| a.name).as_deref(),
        Some("Buyer")
    );
}

#[tokio::test]
async fn null_payload_is_generic_unknown_and_keeps_cache() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let labels = &stores.shipping_labels;

    mount_labels(&server, 25, vec![label_item(1)]).await;
    labels
        .fetch_shipping_labels_for_order(&site, 25)
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v1/connect/label/25"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = labels
        .fetch_shipping_labels_for_order(&site, 25)
        .await
        .unwrap_err();
    assert!(err.is_generic_unknown());
    assert_eq!(
        labels
            .get_shipping_labels_for_order(&site, 25)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn api_error_is_returned_as_classified_error() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v1/connect/label/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "woocommerce_rest_shop_order_invalid_id",
            "message": "Invalid ID.",
            "data": { "status": 404 }
        })))
        .mount(&server)
        .await;

    let err = stores
        .shipping_labels
        .fetch_shipping_labels_for_order(&site, 99)
        .await
        .unwrap_err();
    assert_eq!(err.error_type, WooErrorType::InvalidId);
    assert_eq!(err.original, GenericErrorType::NotFound);
    assert_eq!(err.message.as_deref(), Some("Invalid ID."));
}

#[tokio::test]
async fn empty_order_reads_as_empty_list() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let cached = stores
        .shipping_labels
        .get_shipping_labels_for_order(&site, 404)
        .await
        .unwrap();
    assert!(cached.is_empty());
}

#[tokio::test]
async fn refund_returns_success_flag() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v1/connect/label/25/7/refund"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "refund": null
        })))
        .mount(&server)
        .await;

    let refunded = stores
        .shipping_labels
        .refund_shipping_label_for_order(&site, 25, 7)
        .await;
    assert_eq!(refunded, Ok(false));
}

#[tokio::test]
async fn refund_null_payload_is_generic_unknown() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v1/connect/label/25/7/refund"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = stores
        .shipping_labels
        .refund_shipping_label_for_order(&site, 25, 7)
        .await
        .unwrap_err();
    assert!(err.is_generic_unknown());
}

#[tokio::test]
async fn print_returns_content_only_on_success() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v1/connect/label/print"))
        .and(query_param("label_id_csv", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mimeType": "application/pdf",
            "b64Content": "JVBERi0xLjQK",
            "success": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v1/connect/label/print"))
        .and(query_param("label_id_csv", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mimeType": "application/pdf",
            "b64Content": "JVBERi0xLjQK",
            "success": false
        })))
        .mount(&server)
        .await;

    let store = &stores.shipping_labels;
    assert_eq!(
        store.print_shipping_label(&site, "label", 7).await,
        Ok("JVBERi0xLjQK".to_string())
    );
    let err = store
        .print_shipping_label(&site, "label", 8)
        .await
        .unwrap_err();
    assert!(err.is_generic_unknown());
}

#[tokio::test]
async fn verify_address_classifies_response() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v1/connect/normalize-address"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "field_errors": { "address": "Address not found" }
        })))
        .mount(&server)
        .await;

    let result = stores
        .shipping_labels
        .verify_address(&site, &ShippingLabelAddress::default(), AddressType::Destination)
        .await;
    assert_eq!(
        result,
        Ok(AddressVerificationResult::InvalidAddress(
            "Address not found".to_string()
        ))
    );
}

#[tokio::test]
async fn verify_address_error_gets_empty_message() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v1/connect/normalize-address"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = stores
        .shipping_labels
        .verify_address(&site, &ShippingLabelAddress::default(), AddressType::Origin)
        .await
        .unwrap_err();
    assert_eq!(err.original, GenericErrorType::ServerError);
    assert_eq!(err.message.as_deref(), Some(""));
}

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

fn products_leaderboard(ids: &[i64]) -> serde_json::Value {
    let rows: Vec<_> = ids
        .iter()
        .map(|id| {
            json!([
                {
                    "display": format!("<a href='https://shop.example/wp-admin/admin.php?page=wc-admin&path=/analytics/products&filter=single_product&products={id}'>Product {id}</a>"),
                    "value": format!("Product {id}")
                },
                { "display": "2", "value": 2 },
                {
                    "display": "<span class=\"woocommerce-Price-amount amount\"><span class=\"woocommerce-Price-currencySymbol\">&euro;</span>20.00</span>",
                    "value": 20.0
                }
            ])
        })
        .collect();
    json!([
        { "id": "categories", "label": "Top categories", "headers": [], "rows": [] },
        { "id": "products", "label": "Top products", "headers": [], "rows": rows }
    ])
}

#[tokio::test]
async fn leaderboard_fetch_replaces_only_its_granularity() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let store = &stores.leaderboards;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc-analytics/leaderboards"))
        .and(query_param("interval", "day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_leaderboard(&[1, 2])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wc-analytics/leaderboards"))
        .and(query_param("interval", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_leaderboard(&[9])))
        .mount(&server)
        .await;

    let range =
        StatsGranularity::Days.current_period(NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    let days = store
        .fetch_product_leaderboards(&site, StatsGranularity::Days, Some(range), Some(3))
        .await
        .expect("days fetch should succeed");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].currency.as_deref(), Some("€"));

    let months = store
        .fetch_product_leaderboards(&site, StatsGranularity::Months, None, None)
        .await
        .expect("months fetch should succeed");
    assert_eq!(months.len(), 1);

    assert_eq!(
        store
            .get_cached_top_performer_products(&site, StatsGranularity::Days)
            .await
            .unwrap(),
        days
    );
    assert_eq!(
        store
            .delete_top_performer_products(&site, StatsGranularity::Months)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn leaderboard_without_products_board_clears_cache() {
    let server = MockServer::start().await;
    let (stores, site, pool) = setup(&server).await;

    wcsdk_db::insert_or_update_top_performer_products(
        &pool,
        &[wcsdk_core::TopPerformerProduct {
            site_id: site.id,
            granularity: StatsGranularity::Weeks,
            product_id: 5,
            product_name: Some("Stale".to_string()),
            currency: None,
            quantity: None,
            total: None,
        }],
    )
    .await
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/wp-json/wc-analytics/leaderboards"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "coupons", "rows": [] }])),
        )
        .mount(&server)
        .await;

    let products = stores
        .leaderboards
        .fetch_product_leaderboards(&site, StatsGranularity::Weeks, None, None)
        .await
        .unwrap();
    assert!(products.is_empty());
    assert!(stores
        .leaderboards
        .get_cached_top_performer_products(&site, StatsGranularity::Weeks)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn leaderboard_null_payload_is_generic_unknown_and_keeps_cache() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let store = &stores.leaderboards;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc-analytics/leaderboards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_leaderboard(&[1, 2])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let cached = store
        .fetch_product_leaderboards(&site, StatsGranularity::Years, None, None)
        .await
        .expect("first fetch should succeed");

    Mock::given(method("GET"))
        .and(path("/wp-json/wc-analytics/leaderboards"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    let err = store
        .fetch_product_leaderboards(&site, StatsGranularity::Years, None, None)
        .await
        .unwrap_err();
    assert!(err.is_generic_unknown());

    assert_eq!(
        store
            .get_cached_top_performer_products(&site, StatsGranularity::Years)
            .await
            .unwrap(),
        cached
    );
}

#[tokio::test]
async fn repeated_product_is_cached_once_and_matches_fetch() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let store = &stores.leaderboards;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc-analytics/leaderboards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_leaderboard(&[4, 6, 4])))
        .mount(&server)
        .await;

    let fetched = store
        .fetch_product_leaderboards(&site, StatsGranularity::Days, None, None)
        .await
        .unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(
        store
            .get_cached_top_performer_products(&site, StatsGranularity::Days)
            .await
            .unwrap(),
        fetched
    );
}

// ---------------------------------------------------------------------------
// System status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ssr_fetch_caches_snapshot() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;
    let store = &stores.system_status;

    assert!(store.get_ssr(&site).await.unwrap().is_none());

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/system_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "environment": { "wp_version": "6.4" },
            "database": { "wc_database_version": "8.0.0" },
            "pages": []
        })))
        .mount(&server)
        .await;

    let fetched = store.fetch_ssr(&site).await.expect("fetch should succeed");
    let expected = SiteSystemStatus {
        site_id: 321,
        environment: Some(r#"{"wp_version":"6.4"}"#.to_string()),
        database: Some(r#"{"wc_database_version":"8.0.0"}"#.to_string()),
        active_plugins: None,
        theme: None,
        settings: None,
        security: None,
        pages: Some("[]".to_string()),
    };
    assert_eq!(fetched, expected);
    assert_eq!(store.get_ssr(&site).await.unwrap(), Some(expected));
    assert_eq!(store.delete_ssr(&site).await.unwrap(), 1);
}

#[tokio::test]
async fn ssr_empty_body_is_generic_unknown() {
    let server = MockServer::start().await;
    let (stores, site, _pool) = setup(&server).await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wc/v3/system_status"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = stores.system_status.fetch_ssr(&site).await.unwrap_err();
    assert_eq!(err.error_type, WooErrorType::GenericError);
    assert_eq!(err.original, GenericErrorType::Unknown);
}
