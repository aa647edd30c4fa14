use super::*;
use axum::{body, body::Body, http::Request};
use catalog::{CatalogClient, MemoryCatalog};
use shared::domain::{Product, ProductId};
use tower::ServiceExt;

fn product(n: u32, title: &str) -> Product {
    Product {
        id: ProductId::parse(&n.to_string()).expect("id"),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        thumbnail_url: None,
        status: None,
    }
}

fn test_app(count: u32) -> (Router, Arc<MemoryCatalog>) {
    let catalog = Arc::new(MemoryCatalog::new(
        (1..=count)
            .map(|n| product(n, &format!("Product {n:02}")))
            .collect(),
    ));
    let admin = AdminContext::new(catalog.clone());
    (build_router(Arc::new(AppState { admin })), catalog)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _catalog) = test_app(0);
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn list_route_pages_forward_and_back() {
    let (app, _catalog) = test_app(8);

    let request = Request::get("/app").body(Body::empty()).expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let first = json_body(response).await;
    assert_eq!(first["products"].as_array().expect("rows").len(), 5);
    assert_eq!(first["sort_key"], "CREATED_AT");
    assert_eq!(first["products"][0]["href"], "/app/product/1");
    assert_eq!(first["pagination"]["has_previous"], false);
    let next_href = first["pagination"]["next_href"]
        .as_str()
        .expect("next href")
        .to_string();

    let request = Request::get(next_href).body(Body::empty()).expect("request");
    let second = json_body(app.clone().oneshot(request).await.expect("response")).await;
    assert_eq!(second["products"].as_array().expect("rows").len(), 3);
    assert_eq!(second["products"][0]["title"], "Product 06");
    assert_eq!(second["pagination"]["has_next"], false);
    let previous_href = second["pagination"]["previous_href"]
        .as_str()
        .expect("previous href")
        .to_string();

    let request = Request::get(previous_href)
        .body(Body::empty())
        .expect("request");
    let back = json_body(app.oneshot(request).await.expect("response")).await;
    assert_eq!(back["products"], first["products"]);
}

#[tokio::test]
async fn invalid_list_params_hit_the_error_boundary() {
    let (app, _catalog) = test_app(3);
    let request = Request::get("/app?sortKey=PRICE")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "validation");
}

#[tokio::test]
async fn product_route_returns_detail_or_not_found() {
    let (app, _catalog) = test_app(2);

    let request = Request::get("/app/product/2")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["product"]["id"], "gid://shopify/Product/2");
    assert_eq!(body["form"]["title"], "Product 02");
    assert_eq!(body["form"]["save_enabled"], false);

    let request = Request::get("/app/product/99")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["code"], "not_found");
}

#[tokio::test]
async fn edit_action_updates_title() {
    let (app, catalog) = test_app(2);

    let response = app
        .oneshot(form_post(
            "/app/product/1",
            "id=gid%3A%2F%2Fshopify%2FProduct%2F1&title=Renamed+%22hat%22",
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "Product updated successfully");

    let product = catalog
        .fetch_product(&ProductId::parse("1").expect("id"))
        .await
        .expect("product");
    assert_eq!(product.title, "Renamed \"hat\"");
}

#[tokio::test]
async fn edit_action_failures_are_structured() {
    let (app, _catalog) = test_app(2);

    let response = app
        .clone()
        .oneshot(form_post("/app/product/1", "id=1&title="))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["status"], 422);
    assert_eq!(body["message"], "Title can't be blank");

    let response = app
        .oneshot(form_post("/app/product/42", "id=42&title=Ghost"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["message"], "An error occurred");
}

#[tokio::test]
async fn malformed_edit_form_still_returns_action_result() {
    let (app, catalog) = test_app(1);

    let response = app
        .clone()
        .oneshot(form_post("/app/product/1", "id=1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let result: ActionResult = serde_json::from_slice(&bytes).expect("action result");
    assert_eq!(result.status, 422);
    assert!(result.message.contains("title"), "{}", result.message);

    let oversized = format!("id=1&title={}", "x".repeat(MAX_FORM_BYTES + 1));
    let response = app
        .clone()
        .oneshot(form_post("/app/product/1", &oversized))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = json_body(response).await;
    assert_eq!(body["status"], 413);

    let request = Request::post("/app/product/1")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"id":"1","title":"B"}"#))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_body(response).await["status"], 415);

    let product = catalog
        .fetch_product(&ProductId::parse("1").expect("id"))
        .await
        .expect("product");
    assert_eq!(product.title, "Product 01");
}
