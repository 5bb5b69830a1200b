//! Router tests driving the full middleware stack in-process.

#![allow(clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use tower::ServiceExt;
use ubermelon_storefront::{
    build_router,
    config::{LogFormat, SentryConfig, StorefrontConfig},
    db::{CustomerRepository, MelonCatalog},
    state::AppState,
};
use url::Url;

const CATALOG: &str = "\
cren|Crenshaw|Crenshaw|2.00|/static/img/melon-green.svg|green|0
yw|Watermelon|Yellow Watermelon|3.25|/static/img/melon-yellow.svg|yellow|1
";

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: Url::parse("http://localhost:5000").unwrap(),
        session_secret: None,
        melons_file: PathBuf::new(),
        customers_file: PathBuf::new(),
        static_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("static"),
        log_format: LogFormat::Pretty,
        sentry: SentryConfig::default(),
    }
}

fn app_with_catalog(catalog: &str) -> Router {
    let catalog = MelonCatalog::from_reader(catalog.as_bytes()).unwrap();
    build_router(AppState::new(
        test_config(),
        catalog,
        CustomerRepository::new(),
    ))
}

fn app() -> Router {
    app_with_catalog(CATALOG)
}

async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_depends_on_catalog() {
    assert_eq!(get(app(), "/health/ready").await.status(), StatusCode::OK);
    assert_eq!(
        get(app_with_catalog(""), "/health/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_home_page() {
    let response = get(app(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Welcome to Ubermelon"));
    assert!(body.contains("Crenshaw"));
}

#[tokio::test]
async fn test_melons_listed_in_catalog_order() {
    let response = get(app(), "/melons").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    let crenshaw = body.find("Crenshaw").unwrap();
    let yellow = body.find("Yellow Watermelon").unwrap();
    assert!(crenshaw < yellow);
    assert!(body.contains("$3.25"));
}

#[tokio::test]
async fn test_melon_detail() {
    let response = get(app(), "/melon/yw").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Yellow Watermelon"));
    assert!(body.contains("action=\"/add_to_cart/yw\""));
}

#[tokio::test]
async fn test_unknown_melon_is_not_found() {
    let response = get(app(), "/melon/kiwi").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("kiwi"));

    // Not a valid ID at all
    let response = get(app(), "/melon/not%20a%20melon").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_to_cart_redirects_to_cart() {
    for method in [Method::GET, Method::POST] {
        let response = send(app(), method, "/add_to_cart/cren").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/cart");
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }
}

#[tokio::test]
async fn test_add_unknown_melon_is_not_found() {
    let response = get(app(), "/add_to_cart/kiwi").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_cart_page() {
    let response = get(app(), "/cart").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_anonymous_checkout_redirects_to_login() {
    let response = get(app(), "/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_and_signup_forms() {
    let body = body_text(get(app(), "/login").await).await;
    assert!(body.contains("action=\"/login\""));

    let body = body_text(get(app(), "/signup").await).await;
    assert!(body.contains("name=\"first_name\""));
}

#[tokio::test]
async fn test_static_files_served() {
    let response = get(app(), "/static/css/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let response = get(app(), "/melons").await;
    let headers = response.headers();

    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
}
