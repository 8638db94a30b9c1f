use std::time::Duration;

use axum::{Router, extract::RawQuery, http::StatusCode as AxumStatus, routing::get};
use catalog_api::app::{AppServices, build_app};
use catalog_infra::external::ExternalApiClient;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn_router(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    /// Catalog API (same router as prod, in-memory repository) proxying to `upstream`.
    async fn spawn(upstream: &str) -> Self {
        let external = ExternalApiClient::new(upstream, Duration::from_secs(5)).unwrap();
        Self::spawn_router(build_app(AppServices::in_memory(external))).await
    }

    /// Fake external API used by the proxy tests.
    async fn spawn_upstream() -> Self {
        let app = Router::new()
            .route(
                "/todos/1",
                get(|| async { axum::Json(json!({ "id": 1, "title": "write tests" })) }),
            )
            .route("/plain", get(|| async { "hello" }))
            .route("/public/ok", get(|| async { "public" }))
            .route("/secret", get(|| async { "SECRET" }))
            .route(
                "/echo",
                get(|RawQuery(query): RawQuery| async move { query.unwrap_or_default() }),
            )
            .route(
                "/missing",
                get(|| async { (AxumStatus::NOT_FOUND, "nope") }),
            );
        Self::spawn_router(app).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create(client: &reqwest::Client, base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{}/api/product", base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_reports_backend() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["backend"], "in_memory");
}

#[tokio::test]
async fn list_starts_empty() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;

    let res = reqwest::get(format!("{}/api/product", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn product_lifecycle_create_get_update_delete() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    // Create
    let res = create(
        &client,
        &srv.base_url,
        json!({ "name": "Widget", "price": 9.5, "description": "blue" }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["price"], 9.5);
    assert_eq!(created["description"], "blue");

    // List returns the inserted row
    let res = client
        .get(format!("{}/api/product", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed, json!([created.clone()]));

    // Get by id
    let res = client
        .get(format!("{}/api/product/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);

    // Full-record update
    let res = client
        .put(format!("{}/api/product/{}", srv.base_url, id))
        .json(&json!({ "name": "Widget XL", "price": 12.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Widget XL");
    assert!(updated["description"].is_null());

    // Delete
    let res = client
        .delete(format!("{}/api/product/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/product/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_empty_name_is_rejected() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let res = create(&client, &srv.base_url, json!({ "name": "  ", "price": 3.0 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("name"));

    let res = client
        .get(format!("{}/api/product", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_with_non_positive_price_is_rejected() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let res = create(&client, &srv.base_url, json!({ "name": "Free", "price": 0 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn create_with_malformed_body_is_rejected() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let res = create(&client, &srv.base_url, json!({ "price": 3.0 })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();
    let unknown = "0190b6d2-7c1e-7000-8000-000000000000";

    let res = client
        .get(format!("{}/api/product/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(format!("{}/api/product/{}", srv.base_url, unknown))
        .json(&json!({ "name": "Ghost", "price": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Deleting something that does not exist is a silent no-op.
    let res = client
        .delete(format!("{}/api/product/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/product/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn external_api_proxies_upstream_body() {
    let upstream = TestServer::spawn_upstream().await;
    let srv = TestServer::spawn(&upstream.base_url).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/externalapi/todos/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "id": 1, "title": "write tests" }));

    let res = client
        .get(format!("{}/api/externalapi/plain", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "hello");
}

#[tokio::test]
async fn external_api_failure_is_bad_gateway() {
    let upstream = TestServer::spawn_upstream().await;
    let srv = TestServer::spawn(&upstream.base_url).await;

    let res = reqwest::get(format!("{}/api/externalapi/missing", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "upstream_error");
}

#[tokio::test]
async fn external_api_unreachable_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let srv = TestServer::spawn(&dead).await;
    let res = reqwest::get(format!("{}/api/externalapi/anything", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn external_api_forwards_query_string() {
    let upstream = TestServer::spawn_upstream().await;
    let srv = TestServer::spawn(&upstream.base_url).await;

    let res = reqwest::get(format!("{}/api/externalapi/echo?userId=1&_limit=2", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "userId=1&_limit=2");
}

#[tokio::test]
async fn external_api_cannot_leave_the_base_path() {
    let upstream = TestServer::spawn_upstream().await;
    let srv = TestServer::spawn(&format!("{}/public", upstream.base_url)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/externalapi/ok", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "public");

    // The router decodes the path once, so these reach the client as `%2e%2e`-style segments.
    for escape in ["%252e%252e/secret", "%252E%252E/secret", ".%252e/secret", "ok/%252e%252e/%252e%252e/secret"] {
        let res = client
            .get(format!("{}/api/externalapi/{}", srv.base_url, escape))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{escape}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_endpoint", "{escape}");
    }

    let res = client
        .get(format!("{}/api/externalapi/a%5Cb", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_with_invalid_body_is_rejected() {
    let srv = TestServer::spawn("http://127.0.0.1:1").await;
    let client = reqwest::Client::new();

    let res = create(&client, &srv.base_url, json!({ "name": "Widget", "price": 9.5 })).await;
    let created: serde_json::Value = res.json().await.unwrap();
    let url = format!("{}/api/product/{}", srv.base_url, created["id"].as_str().unwrap());

    let res = client
        .put(&url)
        .json(&json!({ "name": "", "price": -1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name") && message.contains("price"), "{message}");

    // Missing `price` fails JSON extraction.
    let res = client
        .put(&url)
        .json(&json!({ "name": "Widget XL" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client.get(&url).send().await.unwrap();
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
}
