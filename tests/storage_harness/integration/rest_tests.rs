//! REST integration test macro for record store backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that drive
//! a `RecordStore` through full round-trips:
//! JSON → HTTP request → handler → RecordStore → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$factory` must be an async expression producing a `StoreFixture`.
///
/// # Generated Tests
///
/// ## Customers
/// - `test_rest_create_customer` — POST 201 + derived entityId
/// - `test_rest_get_customer` — GET 200 equals create body
/// - `test_rest_list_customers` — GET 200 array
/// - `test_rest_update_customer` — PUT 204, status forced to On Hold
/// - `test_rest_delete_customer` — DELETE 204, then GET 404
///
/// ## Sales orders
/// - `test_rest_create_sales_order` — POST 201 + defaults
/// - `test_rest_create_sales_order_unknown_customer` — 400 with message
/// - `test_rest_update_sales_order_bills` — PUT `{}` 204, list shows Billed
/// - `test_rest_delete_sales_order`
/// - `test_rest_get_sales_order_not_routed` — GET item 405
///
/// ## Errors
/// - `test_rest_error_not_found` / `test_rest_error_invalid_id` /
///   `test_rest_error_invalid_body` / `test_rest_error_restrict_delete`
///
/// ## Scenario
/// - `test_rest_customer_order_lifecycle`
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use getsuite::prelude::*;
            use serde_json::{Value, json};
            use std::ops::Deref;
            use std::sync::Arc;
            use storage_harness::integration::{
                CUSTOMER_PATH, SALES_ORDER_PATH, build_test_router, customer_path,
                sales_order_path,
            };

            /// Test server that keeps its store fixture alive
            struct TestApp {
                server: TestServer,
                _fixture: StoreFixture,
            }

            impl Deref for TestApp {
                type Target = TestServer;

                fn deref(&self) -> &TestServer {
                    &self.server
                }
            }

            async fn make_server_with(policy: DeletePolicy) -> TestApp {
                let fixture: StoreFixture = $factory.await;
                let server = TestServer::new(build_test_router(Arc::clone(&fixture.store), policy));
                TestApp {
                    server,
                    _fixture: fixture,
                }
            }

            async fn make_server() -> TestApp {
                make_server_with(DeletePolicy::Orphan).await
            }

            async fn post_customer(server: &TestServer, name: &str) -> Value {
                let response = server
                    .post(CUSTOMER_PATH)
                    .json(&json!({
                        "companyName": name,
                        "email": format!("{}@example.com", name.to_lowercase())
                    }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            async fn post_sales_order(server: &TestServer, entity: i64, total: f64) -> Value {
                let response = server
                    .post(SALES_ORDER_PATH)
                    .json(&json!({ "entity": entity, "total": total }))
                    .await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            // ==============================================================
            // Customers
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create_customer() {
                let server = make_server().await;

                let response = server
                    .post(CUSTOMER_PATH)
                    .json(&json!({ "companyName": "Acme", "email": "a@acme.com" }))
                    .await;
                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert_eq!(body["id"], 1);
                assert_eq!(body["entityId"], "CUST-1");
                assert_eq!(body["companyName"], "Acme");
                assert_eq!(body["email"], "a@acme.com");
                assert_eq!(body["status"], "Active");
                assert!(body["dateCreated"].as_str().is_some());
                assert!(body["lastUpdated"].is_null());
            }

            #[tokio::test]
            async fn test_rest_get_customer() {
                let server = make_server().await;
                let created = post_customer(&server, "Globex").await;
                let id = created["id"].as_i64().unwrap();

                let response = server.get(&customer_path(id)).await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body, created);
            }

            #[tokio::test]
            async fn test_rest_list_customers() {
                let server = make_server().await;

                let empty: Value = server.get(CUSTOMER_PATH).await.json();
                assert_eq!(empty, json!([]));

                post_customer(&server, "Alpha").await;
                post_customer(&server, "Beta").await;
                post_customer(&server, "Gamma").await;

                let response = server.get(CUSTOMER_PATH).await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body.as_array().unwrap().len(), 3);
            }

            #[tokio::test]
            async fn test_rest_update_customer() {
                let server = make_server().await;
                let created = post_customer(&server, "Initech").await;
                let id = created["id"].as_i64().unwrap();

                let response = server
                    .put(&customer_path(id))
                    .json(&json!({ "email": "billing@initech.com" }))
                    .await;
                response.assert_status(StatusCode::NO_CONTENT);

                let body: Value = server.get(&customer_path(id)).await.json();
                assert_eq!(body["email"], "billing@initech.com");
                assert_eq!(body["companyName"], "Initech");
                assert_eq!(body["status"], "On Hold");
                assert!(body["lastUpdated"].as_str().is_some());
            }

            #[tokio::test]
            async fn test_rest_update_customer_explicit_status() {
                let server = make_server().await;
                let created = post_customer(&server, "Hooli").await;
                let id = created["id"].as_i64().unwrap();

                server
                    .put(&customer_path(id))
                    .json(&json!({ "status": "Active" }))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let body: Value = server.get(&customer_path(id)).await.json();
                assert_eq!(body["status"], "Active");
            }

            #[tokio::test]
            async fn test_rest_delete_customer() {
                let server = make_server().await;
                let created = post_customer(&server, "Umbrella").await;
                let id = created["id"].as_i64().unwrap();

                server
                    .delete(&customer_path(id))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                server
                    .get(&customer_path(id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .delete(&customer_path(id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Sales orders
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create_sales_order() {
                let server = make_server().await;
                let customer = post_customer(&server, "Acme").await;
                let customer_id = customer["id"].as_i64().unwrap();

                let body = post_sales_order(&server, customer_id, 99.5).await;
                assert_eq!(body["id"], 1);
                assert_eq!(body["tranId"], "SO-1");
                assert_eq!(body["entity"], customer_id);
                assert_eq!(body["total"], 99.5);
                assert_eq!(body["status"], "Pending Fulfillment");
                assert_eq!(body["trandate"], storage_harness::today());
            }

            #[tokio::test]
            async fn test_rest_create_sales_order_unknown_customer() {
                let server = make_server().await;

                let response = server
                    .post(SALES_ORDER_PATH)
                    .json(&json!({ "entity": 999, "total": 1.0 }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_REFERENCE");
                assert_eq!(
                    body["message"],
                    "Customer ID 999 not found. Cannot create Sales Order."
                );

                let orders: Value = server.get(SALES_ORDER_PATH).await.json();
                assert_eq!(orders, json!([]));
            }

            #[tokio::test]
            async fn test_rest_update_sales_order_bills() {
                let server = make_server().await;
                let customer = post_customer(&server, "Acme").await;
                let order =
                    post_sales_order(&server, customer["id"].as_i64().unwrap(), 12.0).await;
                let id = order["id"].as_i64().unwrap();

                server
                    .put(&sales_order_path(id))
                    .json(&json!({}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let orders: Value = server.get(SALES_ORDER_PATH).await.json();
                let billed = &orders.as_array().unwrap()[0];
                assert_eq!(billed["status"], "Billed");
                assert_eq!(billed["total"], 12.0);
                assert!(billed["lastUpdated"].as_str().is_some());
            }

            #[tokio::test]
            async fn test_rest_update_missing_sales_order() {
                let server = make_server().await;
                let response = server
                    .put(&sales_order_path(41))
                    .json(&json!({}))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["message"], "Sales Order not found");
            }

            #[tokio::test]
            async fn test_rest_delete_sales_order() {
                let server = make_server().await;
                let customer = post_customer(&server, "Acme").await;
                let order =
                    post_sales_order(&server, customer["id"].as_i64().unwrap(), 5.0).await;
                let id = order["id"].as_i64().unwrap();

                server
                    .delete(&sales_order_path(id))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                server
                    .delete(&sales_order_path(id))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_get_sales_order_not_routed() {
                let server = make_server().await;
                let customer = post_customer(&server, "Acme").await;
                let order =
                    post_sales_order(&server, customer["id"].as_i64().unwrap(), 5.0).await;

                server
                    .get(&sales_order_path(order["id"].as_i64().unwrap()))
                    .await
                    .assert_status(StatusCode::METHOD_NOT_ALLOWED);
            }

            // ==============================================================
            // Errors
            // ==============================================================

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;

                let response = server.get(&customer_path(12345)).await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "RECORD_NOT_FOUND");
                assert_eq!(body["message"], "Customer not found");
                assert_eq!(body["details"]["id"], 12345);
            }

            #[tokio::test]
            async fn test_rest_error_invalid_id() {
                let server = make_server().await;

                let response = server.get(&format!("{}/abc", CUSTOMER_PATH)).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_RECORD_ID");
            }

            #[tokio::test]
            async fn test_rest_error_invalid_body() {
                let server = make_server().await;

                let response = server
                    .post(CUSTOMER_PATH)
                    .json(&json!({ "email": "missing-name@example.com" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_BODY");

                let customers: Value = server.get(CUSTOMER_PATH).await.json();
                assert_eq!(customers, json!([]));
            }

            #[tokio::test]
            async fn test_rest_error_restrict_delete() {
                let server = make_server_with(DeletePolicy::Restrict).await;
                let customer = post_customer(&server, "Acme").await;
                let customer_id = customer["id"].as_i64().unwrap();
                post_sales_order(&server, customer_id, 5.0).await;

                let response = server.delete(&customer_path(customer_id)).await;
                response.assert_status(StatusCode::CONFLICT);
                let body: Value = response.json();
                assert_eq!(body["code"], "RECORD_REFERENCED");
                assert_eq!(body["details"]["dependents"], 1);

                server
                    .get(&customer_path(customer_id))
                    .await
                    .assert_status(StatusCode::OK);
            }

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server().await;

                let response = server.get("/health").await;
                response.assert_status(StatusCode::OK);
                let body: Value = response.json();
                assert_eq!(body["status"], "ok");
                assert_eq!(body["service"], "getsuite");
            }

            // ==============================================================
            // Scenario
            // ==============================================================

            #[tokio::test]
            async fn test_rest_customer_order_lifecycle() {
                let server = make_server().await;

                let customer = post_customer(&server, "Acme").await;
                assert_eq!(customer["entityId"], "CUST-1");
                let customer_id = customer["id"].as_i64().unwrap();

                let order = post_sales_order(&server, customer_id, 250.0).await;
                assert_eq!(order["tranId"], "SO-1");
                let order_id = order["id"].as_i64().unwrap();

                server
                    .put(&customer_path(customer_id))
                    .json(&json!({}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                let held: Value = server.get(&customer_path(customer_id)).await.json();
                assert_eq!(held["status"], "On Hold");

                server
                    .put(&sales_order_path(order_id))
                    .json(&json!({}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                server
                    .delete(&sales_order_path(order_id))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                server
                    .delete(&customer_path(customer_id))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let customers: Value = server.get(CUSTOMER_PATH).await.json();
                let orders: Value = server.get(SALES_ORDER_PATH).await.json();
                assert_eq!(customers, json!([]));
                assert_eq!(orders, json!([]));

                // Ids are not reused after deletion
                let next = post_customer(&server, "Acme").await;
                assert_eq!(next["entityId"], "CUST-2");
            }
        }
    };
}
