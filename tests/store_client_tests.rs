//! Store client tests against a local mock of the Xsolla Store API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test store_client_tests
//! ```

use mockito::Matcher;
use serde_json::json;
use xsolla_sdk::{Config, RequestMetadata, StoreClient, StoreSettings, SDK_VERSION};

const CATALOG_PATH: &str = "/v1/project/44056/items/virtual_items";

const CATALOG_BODY: &str = r#"{
    "items": [
        {
            "sku": "big_rocket",
            "name": "Big Rocket",
            "type": "virtual_good",
            "description": "Big Rocket - short description",
            "is_free": false,
            "groups": [{"external_id": "accessory", "name": "Accessory"}],
            "price": {"amount": "100.99", "amount_without_discount": "100.99", "currency": "USD"},
            "virtual_prices": []
        },
        {
            "sku": "crystal_pack",
            "name": "Crystal Pack",
            "type": "virtual_good",
            "virtual_prices": [{"sku": "crystal", "amount": 100, "is_default": true}]
        }
    ]
}"#;

// ============================================================================
// Test Utilities
// ============================================================================

fn metadata() -> RequestMetadata {
    RequestMetadata::new("ue5", "5.3.2")
}

fn store_for(server: &mockito::ServerGuard) -> StoreClient {
    StoreClient::new(server.url(), StoreSettings::default(), metadata())
}

fn metadata_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("engine".into(), "ue5".into()),
        Matcher::UrlEncoded("engine_v".into(), "5.3.2".into()),
        Matcher::UrlEncoded("sdk".into(), "store".into()),
        Matcher::UrlEncoded("sdk_v".into(), SDK_VERSION.into()),
    ])
}

// ============================================================================
// Virtual Items
// ============================================================================

mod virtual_items {
    use super::*;

    #[tokio::test]
    async fn test_fetch_decodes_catalog() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", CATALOG_PATH)
            .match_query(metadata_query())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CATALOG_BODY)
            .expect(1)
            .create_async()
            .await;

        let catalog = store_for(&server).fetch_virtual_items().await.unwrap();

        assert_eq!(catalog.items.len(), 2);
        assert_eq!(catalog.items[0].sku, "big_rocket");
        assert_eq!(catalog.items[0].price.as_ref().unwrap().amount, "100.99");
        assert_eq!(
            catalog.find("crystal_pack").unwrap().default_virtual_price().unwrap().amount,
            100
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_carries_metadata_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", CATALOG_PATH)
            .match_query(Matcher::Any)
            .match_header("engine", "ue5")
            .match_header("engine_v", "5.3.2")
            .match_header("sdk", "store")
            .match_header("sdk_v", SDK_VERSION)
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let catalog = store_for(&server).fetch_virtual_items().await.unwrap();

        assert!(catalog.items.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_configured_project_id_is_used() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/project/77640/items/virtual_items")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let settings = StoreSettings {
            project_id: "77640".to_string(),
            ..Default::default()
        };
        let store = StoreClient::new(format!("{}/", server.url()), settings, metadata());

        assert!(store.fetch_virtual_items().await.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CATALOG_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": "nope"}"#)
            .create_async()
            .await;

        let error = store_for(&server).fetch_virtual_items().await.unwrap_err();

        assert_eq!(error.code, "200");
        assert!(error.message.starts_with("Can't deserialize response json"));
    }
}

// ============================================================================
// Error Decoding
// ============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn test_error_envelope_is_decoded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CATALOG_PATH)
            .match_query(Matcher::Any)
            .with_status(409)
            .with_body(r#"{"error":{"code":"003-003","description":"The username is already taken"}}"#)
            .create_async()
            .await;

        let error = store_for(&server).fetch_virtual_items().await.unwrap_err();

        assert_eq!(error.code, "003-003");
        assert_eq!(error.message, "The username is already taken");
    }

    #[tokio::test]
    async fn test_invalid_json_uses_http_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CATALOG_PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let error = store_for(&server).fetch_virtual_items().await.unwrap_err();

        assert_eq!(error.code, "503");
        assert!(error.message.contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_missing_error_object_uses_http_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CATALOG_PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"statusCode":404}"#)
            .create_async()
            .await;

        let error = store_for(&server).fetch_virtual_items().await.unwrap_err();

        assert_eq!(error.code, "404");
        assert!(error.message.contains(r#"{"statusCode":404}"#));
    }

    #[tokio::test]
    async fn test_transport_failure_reports_no_response() {
        // Nothing listens on port 1
        let store = StoreClient::new("http://127.0.0.1:1", StoreSettings::default(), metadata());

        let error = store.fetch_virtual_items().await.unwrap_err();

        assert_eq!(error.code, "204");
        assert_eq!(error.message, "No response");
    }

    #[tokio::test]
    async fn test_timeout_reports_no_response() {
        use std::io::Write;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", CATALOG_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(std::time::Duration::from_secs(3));
                w.write_all(br#"{"items":[]}"#)
            })
            .create_async()
            .await;

        let mut config = Config::default();
        config.set("api.store_url", &server.url()).unwrap();
        config.set("api.timeout_seconds", "1").unwrap();
        let store = StoreClient::from_config(&config).unwrap();

        let error = store.fetch_virtual_items().await.unwrap_err();

        assert_eq!(error.code, "204");
        assert_eq!(error.message, "No response");
        assert!(error.is_no_response());
    }
}

// ============================================================================
// Payment Token
// ============================================================================

mod payment_token {
    use super::*;

    #[tokio::test]
    async fn test_fetch_payment_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/payment/item/big_rocket")
            .match_query(metadata_query())
            .match_header("authorization", "Bearer user-jwt")
            .match_header("sdk", "store")
            .match_body(Matcher::Json(json!({"sandbox": true})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"pay-token-123","order_id":641}"#)
            .expect(1)
            .create_async()
            .await;

        let token = store_for(&server)
            .fetch_payment_token("user-jwt", "big_rocket")
            .await
            .unwrap();

        assert_eq!(token.token, "pay-token-123");
        assert_eq!(token.order_id, Some(641));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_shipping_build_disables_sandbox() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/payment/item/big_rocket")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({"sandbox": false})))
            .with_status(200)
            .with_body(r#"{"token":"live-token"}"#)
            .create_async()
            .await;

        let store = store_for(&server).with_shipping(true);
        assert!(!store.is_sandbox());

        let token = store
            .fetch_payment_token("user-jwt", "big_rocket")
            .await
            .unwrap();

        assert_eq!(token.token, "live-token");
        assert_eq!(token.order_id, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/payment/item/big_rocket")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error":{"code":"0401-1501","description":"Authorization header not sent"}}"#)
            .create_async()
            .await;

        let error = store_for(&server)
            .fetch_payment_token("", "big_rocket")
            .await
            .unwrap_err();

        assert_eq!(error.code, "0401-1501");
        assert_eq!(error.message, "Authorization header not sent");
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod from_config {
    use super::*;

    #[tokio::test]
    async fn test_client_uses_config_sections() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/project/12345/items/virtual_items")
            .match_query(Matcher::UrlEncoded("engine".into(), "bevy".into()))
            .match_header("engine_v", "0.14")
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let mut config = Config::default();
        config.set("api.store_url", &server.url()).unwrap();
        config.set("api.timeout_seconds", "5").unwrap();
        config.set("store.project_id", "12345").unwrap();
        config.set("engine.name", "bevy").unwrap();
        config.set("engine.version", "0.14").unwrap();
        config.set("engine.shipping", "true").unwrap();

        let store = StoreClient::from_config(&config).unwrap();
        assert!(!store.is_sandbox());

        store.fetch_virtual_items().await.unwrap();
        mock.assert_async().await;
    }
}
