//! Integration tests for Ubermelon.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ubermelon-integration-tests
//! ```
//!
//! No external services are needed: [`TestContext::new`] loads the seed
//! catalog and customers from `crates/storefront/data/`, serves the storefront
//! on `127.0.0.1:0` inside the test runtime and hands back a `reqwest` client
//! that keeps cookies and does not follow redirects, so every hop of a
//! flash-and-redirect flow can be asserted.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use reqwest::{Client, Response, StatusCode, header, redirect};
use tokio::task::JoinHandle;
use ubermelon_storefront::{
    build_router,
    config::{LogFormat, SentryConfig, StorefrontConfig},
    state::AppState,
};
use url::Url;

/// A seeded customer from `crates/storefront/data/customers.txt`.
pub const SEED_EMAIL: &str = "joel@ubermelon.com";

/// Password of [`SEED_EMAIL`].
pub const SEED_PASSWORD: &str = "melon";

fn storefront_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront")
}

/// Storefront configuration pointing at the seed data, bound to an
/// ephemeral port.
///
/// # Panics
///
/// Never in practice; the base URL is a constant.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let dir = storefront_dir();

    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: Url::parse("http://127.0.0.1").expect("static URL is valid"),
        session_secret: None,
        melons_file: dir.join("data/melons.txt"),
        customers_file: dir.join("data/customers.txt"),
        static_dir: dir.join("static"),
        log_format: LogFormat::Pretty,
        sentry: SentryConfig::default(),
    }
}

/// A running storefront and a browser-like client for it.
pub struct TestContext {
    pub client: Client,
    pub addr: SocketAddr,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a storefront on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the seed data cannot be loaded or the port cannot be bound.
    pub async fn new() -> Self {
        let config = test_config();
        let addr = config.socket_addr();
        let state = AppState::load(config).expect("Failed to load seed data");
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                panic!("Test server failed: {e}");
            }
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            addr,
            server,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// POST an urlencoded form to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// GET `path` and return the body of a 200 response.
    ///
    /// # Panics
    ///
    /// Panics if the response is not 200 OK.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        response.text().await.expect("Failed to read body")
    }

    /// Log in as `email`, asserting the redirect target.
    ///
    /// # Panics
    ///
    /// Panics if the response is not a redirect to `expected_location`.
    pub async fn login(&self, email: &str, password: &str, expected_location: &str) {
        let response = self
            .post_form("/login", &[("email", email), ("password", password)])
            .await;
        assert_redirect(&response, expected_location);
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Assert `response` is a 303 redirect to `location`.
///
/// # Panics
///
/// Panics if it is not.
pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}
