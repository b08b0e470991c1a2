//! HTTP-level tests: full router over a temporary SQLite file

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use store_server::api::build_app;
use store_server::db::DbService;
use store_server::notify::{EmailSender, NotificationError, Notifier, SmsSender};
use store_server::{Config, ServerState};

struct DownSms;

#[async_trait]
impl SmsSender for DownSms {
    async fn send(&self, _: &str, _: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("gateway unreachable".into()))
    }
}

struct DownEmail;

#[async_trait]
impl EmailSender for DownEmail {
    async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected {
            status: 503,
            body: "maintenance".into(),
        })
    }
}

struct TestApp {
    app: Router,
    _dir: tempfile::TempDir,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_notifier(Notifier::disabled()).await
    }

    async fn with_notifier(notifier: Notifier) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let path = path.to_str().unwrap();
        let db = DbService::new(path).await.unwrap();
        let state = ServerState::new(Config::with_database(path), db, notifier);
        Self {
            app: build_app(state),
            _dir: dir,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    async fn category(&self, name: &str, parent: Option<i64>) -> i64 {
        let (status, body) = self
            .post("/api/categories", json!({ "name": name, "parent_id": parent }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn product(&self, name: &str, price: &str, categories: Vec<i64>) -> i64 {
        let (status, body) = self
            .post(
                "/api/products",
                json!({ "name": name, "price": price, "categories": categories }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn customer_phone_must_be_unique() {
    let app = TestApp::new().await;
    let customer = json!({ "name": "Achieng", "phone": "+254733000444", "email": "a@example.com" });

    let (status, body) = app.post("/api/customers", customer.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Achieng");

    let (status, body) = app.post("/api/customers", customer).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);
    assert_eq!(body["details"]["field"], "phone");
}

#[tokio::test]
async fn average_price_over_subtree() {
    let app = TestApp::new().await;
    let root = app.category("All", None).await;
    let a = app.category("A", Some(root)).await;
    let b = app.category("B", Some(root)).await;
    let c = app.category("C", Some(a)).await;
    app.product("p10", "10", vec![a]).await;
    app.product("p20", "20", vec![b, c]).await;
    app.product("p30", "30", vec![c]).await;

    let (status, body) = app.get(&format!("/api/categories/{root}/average-price")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_price"], json!(20.0));

    let (_, body) = app.get(&format!("/api/categories/{c}/average-price")).await;
    assert_eq!(body["average_price"], json!(25.0));
}

#[tokio::test]
async fn average_price_null_when_empty_and_404_when_unknown() {
    let app = TestApp::new().await;
    let empty = app.category("Empty", None).await;

    let (status, body) = app
        .get(&format!("/api/categories/{empty}/average-price"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "average_price": null }));

    let (status, body) = app.get("/api/categories/9999/average-price").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6101);
}

#[tokio::test]
async fn duplicate_product_rejected_but_upload_allowed() {
    let app = TestApp::new().await;
    app.product("Lamp", "12.50", vec![]).await;

    let (status, body) = app
        .post("/api/products", json!({ "name": "LAMP", "price": "9.00" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"]["field"], "name");

    let (status, _) = app
        .post("/api/products/upload", json!({ "name": "LAMP", "price": "9.00" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn place_and_fetch_order() {
    let app = TestApp::new().await;
    let a = app.product("Alpha", "5.00", vec![]).await;
    app.product("Beta", "10.00", vec![]).await;

    let (status, order) = app
        .post(
            "/api/orders",
            json!({ "note": "gift wrap", "items": [
                { "product": "alpha", "quantity": 2 },
                { "product": "BETA" }
            ]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["total"], "20.00");
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert_eq!(order["items"][0]["product_id"], a);
    assert_eq!(order["items"][1]["quantity"], 1);

    let id = order["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, order);

    let (status, _) = app.get("/api/orders/4040").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_validation_errors() {
    let app = TestApp::new().await;
    app.product("Dup", "1.00", vec![]).await;
    let (status, _) = app
        .post("/api/products/upload", json!({ "name": "dup", "price": "2.00" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.post("/api/orders", json!({ "items": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "must provide at least one product");
    assert_eq!(body["details"]["field"], "items");

    let (status, body) = app
        .post("/api/orders", json!({ "items": [{ "product": "Dup" }] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6005);

    let (status, body) = app
        .post("/api/orders", json!({ "items": [{ "product": "Nope" }] }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "product 'Nope' not found");

    let (status, body) = app
        .post(
            "/api/orders",
            json!({ "items": [{ "product": "Dup", "quantity": 0 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);
}

#[tokio::test]
async fn order_commits_when_every_notification_fails() {
    let notifier = Notifier::new(
        Some(Arc::new(DownSms)),
        Some(Arc::new(DownEmail)),
        Some("admin@example.com".into()),
    );
    let app = TestApp::with_notifier(notifier).await;
    app.product("Alpha", "5.00", vec![]).await;
    let (_, customer) = app
        .post(
            "/api/customers",
            json!({ "name": "Kamau", "phone": "+254744000555", "email": "k@example.com" }),
        )
        .await;

    let (status, order) = app
        .post(
            "/api/orders",
            json!({ "customer_id": customer["id"], "items": [{ "product": "Alpha", "quantity": 3 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["total"], "15.00");

    let id = order["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["total"], "15.00");
}
