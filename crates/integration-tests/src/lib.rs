//! Integration tests for Agrimart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p agrimart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart store behaviour over real file storage
//! - `storefront_cart` - Cart and checkout endpoints through the full router
//! - `storefront_pages` - HTML pages, health and contact endpoints
//! - `storefront_dealers` - Dealer application endpoints
//!
//! Router tests drive [`agrimart_storefront::app`] in-process with
//! `tower::ServiceExt::oneshot`; no server or network is involved.

use agrimart_core::Catalog;
use agrimart_storefront::config::StorefrontConfig;
use agrimart_storefront::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

/// Largest response body the helpers will read.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// In-process storefront with a cookie jar of one session.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("response is not JSON ({e}): {}", self.body))
    }
}

impl TestClient {
    /// Storefront over the seed catalog with local configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seed())
    }

    /// Storefront over the given catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        let state = AppState::new(StorefrontConfig::local(), catalog);
        Self {
            router: agrimart_storefront::app(state),
            cookie: None,
        }
    }

    /// A second visitor on the same server, without this client's session.
    #[must_use]
    pub fn fresh_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Another client on the same session, for requests sent side by side.
    #[must_use]
    pub fn same_session(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, None).await
    }

    /// Send a request, carrying the session cookie across calls.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|e| panic!("invalid request: {e}"));

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .unwrap_or_else(|e| panic!("failed to read body: {e}"));

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
