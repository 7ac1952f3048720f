use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use product_api::{
    app::{product::model::Product, product::store::ProductStore, WELCOME_MESSAGE},
    core::{middleware::ApiKey, response::ListResponse},
    create_app,
};
use serde_json::{json, Value};

const KEY: &str = "test-key";

fn server() -> TestServer {
    TestServer::new(create_app(ProductStore::seeded(), ApiKey::new(KEY))).unwrap()
}

fn key_header() -> HeaderName {
    HeaderName::from_static("x-api-key")
}

fn key() -> HeaderValue {
    HeaderValue::from_static(KEY)
}

fn kettle() -> Value {
    json!({
        "name": "Kettle",
        "description": "1.7L",
        "price": 30,
        "category": "kitchen",
        "inStock": true
    })
}

fn assert_error(body: &Value, kind: &str) {
    assert_eq!(body["error"], kind);
    assert!(body["message"].is_string());
    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn root_is_public() {
    let server = server();

    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), WELCOME_MESSAGE);
}

#[tokio::test]
async fn product_routes_require_api_key() {
    let server = server();

    for path in ["/api/products", "/api/products/stats", "/api/products/1"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"], "API key missing");

        let response = server
            .get(path)
            .add_header(key_header(), HeaderValue::from_static("wrong"))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["error"], "Invalid API key");
    }
}

#[tokio::test]
async fn authentication_runs_before_validation() {
    let server = server();

    let response = server.post("/api/products").json(&json!({})).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_product_path_still_requires_key() {
    let server = server();

    server
        .get("/api/products/1/extra")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/products/1/extra")
        .add_header(key_header(), key())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NotFoundError");
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let server = server();

    let response = server.get("/nowhere").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_error(&body, "NotFoundError");
    assert_eq!(body["message"], "Route GET /nowhere not found");
}

#[tokio::test]
async fn wrong_method_on_known_path_returns_json_404() {
    let server = server();

    let response = server
        .patch("/api/products/1")
        .add_header(key_header(), key())
        .json(&kettle())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_error(&body, "NotFoundError");
    assert_eq!(body["message"], "Route PATCH /api/products/1 not found");

    let response = server.post("/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NotFoundError");

    let response = server
        .delete("/api/products/stats")
        .add_header(key_header(), key())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NotFoundError");
}

#[tokio::test]
async fn wrong_method_still_requires_key() {
    let server = server();

    server
        .patch("/api/products/1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_ascii_key_is_forbidden_not_missing() {
    let server = server();

    let response = server
        .get("/api/products")
        .add_header(key_header(), HeaderValue::from_bytes(b"caf\xe9").unwrap())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_error(&response.json(), "Invalid API key");
}

#[tokio::test]
async fn decimal_price_is_echoed_unchanged() {
    let server = server();

    let mut body = kettle();
    body["price"] = json!(29.99);
    let created: Value = server
        .post("/api/products")
        .add_header(key_header(), key())
        .json(&body)
        .await
        .json();
    assert_eq!(created["price"], json!(29.99));
}

#[tokio::test]
async fn stats_of_seed_data() {
    let server = server();

    let response = server
        .get("/api/products/stats")
        .add_header(key_header(), key())
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"electronics": 2, "kitchen": 1})
    );
}

#[tokio::test]
async fn list_uses_default_pagination() {
    let server = server();

    let response = server
        .get("/api/products")
        .add_header(key_header(), key())
        .await;
    response.assert_status_ok();

    let body: ListResponse<Product> = response.json();
    assert_eq!(body.page, 1);
    assert_eq!(body.limit, 5);
    assert_eq!(body.total, 3);
    let ids: Vec<_> = body.results.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn create_then_read_back() {
    let server = server();

    let response = server
        .post("/api/products")
        .add_header(key_header(), key())
        .json(&kettle())
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Kettle");
    assert_eq!(created["description"], "1.7L");
    assert_eq!(created["price"], json!(30));
    assert_eq!(created["category"], "kitchen");
    assert_eq!(created["inStock"], true);

    let mut echoed = created.clone();
    echoed.as_object_mut().unwrap().remove("id");
    assert_eq!(echoed, kettle());

    let response = server
        .get(&format!("/api/products/{}", id))
        .add_header(key_header(), key())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn created_ids_are_unique() {
    let server = server();
    let mut ids = Vec::new();

    for _ in 0..5 {
        let product: Product = server
            .post("/api/products")
            .add_header(key_header(), key())
            .json(&kettle())
            .await
            .json();
        ids.push(product.id);
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
    assert!(!ids.iter().any(|id| ["1", "2", "3"].contains(&id.as_str())));
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let server = server();

    let response = server
        .get("/api/products/never-issued")
        .add_header(key_header(), key())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_error(&body, "NotFoundError");
    assert_eq!(body["message"], "Product with id never-issued not found");
}

#[tokio::test]
async fn create_rejects_invalid_bodies() {
    let server = server();

    let mut missing = kettle();
    missing.as_object_mut().unwrap().remove("inStock");

    let mut wrong_type = kettle();
    wrong_type["price"] = json!("thirty");

    for body in [missing, wrong_type, json!({})] {
        let response = server
            .post("/api/products")
            .add_header(key_header(), key())
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error(&response.json(), "ValidationError");
    }

    let response = server
        .post("/api/products")
        .add_header(key_header(), key())
        .text("name=Kettle")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "ValidationError");

    let listed: ListResponse<Product> = server
        .get("/api/products")
        .add_header(key_header(), key())
        .await
        .json();
    assert_eq!(listed.total, 3);
}

#[tokio::test]
async fn put_replaces_everything_but_id() {
    let server = server();

    let response = server
        .put("/api/products/2")
        .add_header(key_header(), key())
        .json(&json!({
            "id": "ignored",
            "name": "Tablet",
            "description": "10 inch",
            "price": -1.5,
            "category": "Gadgets",
            "inStock": false
        }))
        .await;
    response.assert_status_ok();

    let updated: Product = response.json();
    assert_eq!(updated.id, "2");
    assert_eq!(updated.name, "Tablet");
    assert_eq!(updated.description, "10 inch");
    assert_eq!(updated.price, serde_json::Number::from_f64(-1.5).unwrap());
    assert_eq!(updated.category, "Gadgets");
    assert!(!updated.in_stock);

    let fetched: Product = server
        .get("/api/products/2")
        .add_header(key_header(), key())
        .await
        .json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn put_with_missing_field_does_not_mutate() {
    let server = server();

    let response = server
        .put("/api/products/1")
        .add_header(key_header(), key())
        .json(&json!({"name": "Only a name"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let fetched: Product = server
        .get("/api/products/1")
        .add_header(key_header(), key())
        .await
        .json();
    assert_eq!(fetched.name, "Laptop");
}

#[tokio::test]
async fn put_unknown_id_is_404() {
    let server = server();

    server
        .put("/api/products/missing")
        .add_header(key_header(), key())
        .json(&kettle())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent_failing() {
    let server = server();

    let response = server
        .delete("/api/products/3")
        .add_header(key_header(), key())
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Product 3 deleted"})
    );

    let response = server
        .delete("/api/products/3")
        .add_header(key_header(), key())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "NotFoundError");

    let stats: Value = server
        .get("/api/products/stats")
        .add_header(key_header(), key())
        .await
        .json();
    assert_eq!(stats, json!({"electronics": 2}));
}

#[tokio::test]
async fn filters_compose_case_insensitively() {
    let server = server();

    let by_category: ListResponse<Product> = server
        .get("/api/products")
        .add_header(key_header(), key())
        .add_query_param("category", "ELECTRONICS")
        .await
        .json();
    assert_eq!(by_category.total, 2);

    let by_both: ListResponse<Product> = server
        .get("/api/products")
        .add_header(key_header(), key())
        .add_query_param("category", "Electronics")
        .add_query_param("search", "PHONE")
        .await
        .json();
    assert_eq!(by_both.total, 1);
    assert_eq!(by_both.results[0].name, "Smartphone");

    let partial_category: ListResponse<Product> = server
        .get("/api/products")
        .add_header(key_header(), key())
        .add_query_param("category", "electro")
        .await
        .json();
    assert_eq!(partial_category.total, 0);
    assert!(partial_category.results.is_empty());
}

#[tokio::test]
async fn second_page_of_twelve_matches() {
    let server = server();

    for i in 0..12 {
        let mut body = kettle();
        body["name"] = json!(format!("Rake {}", i));
        body["category"] = json!("Garden");
        server
            .post("/api/products")
            .add_header(key_header(), key())
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: ListResponse<Product> = server
        .get("/api/products")
        .add_header(key_header(), key())
        .add_query_param("category", "garden")
        .add_query_param("page", 2)
        .add_query_param("limit", 5)
        .await
        .json();

    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 5);
    assert_eq!(page.total, 12);
    let names: Vec<_> = page.results.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Rake 5", "Rake 6", "Rake 7", "Rake 8", "Rake 9"]);

    let past_end: ListResponse<Product> = server
        .get("/api/products")
        .add_header(key_header(), key())
        .add_query_param("category", "garden")
        .add_query_param("page", 4)
        .add_query_param("limit", 5)
        .await
        .json();
    assert_eq!(past_end.total, 12);
    assert!(past_end.results.is_empty());
}

#[tokio::test]
async fn invalid_pagination_is_rejected() {
    let server = server();

    for (name, value) in [("page", "abc"), ("page", "0"), ("limit", "-1")] {
        let response = server
            .get("/api/products")
            .add_header(key_header(), key())
            .add_query_param(name, value)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_error(&body, "ValidationError");
        assert_eq!(
            body["message"],
            format!("{} must be a positive integer", name)
        );
    }
}
