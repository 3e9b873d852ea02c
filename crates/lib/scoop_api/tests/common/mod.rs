//! Shared harness: the full router over in-memory backends.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use scoop_api::config::ApiConfig;
use scoop_api::{AppState, router};
use scoop_core::models::product::Product;
use scoop_core::repository::ProductRepository;
use scoop_core::repository::memory::{MemoryProductRepository, MemoryUserRepository};
use scoop_core::session::memory::{ManualClock, MemorySessionCache};
use scoop_core::session::SessionCache;
use tower::ServiceExt;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub products: Arc<MemoryProductRepository>,
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        session_secret: "integration-test-secret".into(),
        bcrypt_cost: 4,
        ..ApiConfig::default()
    }
}

pub fn app() -> TestApp {
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(MemorySessionCache::with_clock(clock.clone()));
    app_with_cache(cache, clock)
}

pub fn app_with_cache(cache: Arc<dyn SessionCache>, clock: Arc<ManualClock>) -> TestApp {
    let products = Arc::new(MemoryProductRepository::new());
    let state = AppState::new(
        test_config(),
        Arc::new(MemoryUserRepository::new()),
        products.clone(),
        cache,
    )
    .expect("state");
    TestApp {
        router: router(state).expect("router"),
        clock,
        products,
    }
}

pub fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub fn sample_product(id: &str) -> Product {
    Product {
        product_id: id.into(),
        name: "Vanilla Toffee Bar Crunch".into(),
        image_closed_url: "https://example.com/closed.png".into(),
        image_open_url: "https://example.com/open.png".into(),
        description: "Vanilla ice cream with fudge covered toffee pieces".into(),
        story: "Made for the crunch.".into(),
        sourcing_values: Some(vec!["Non-GMO".into(), "Fairtrade".into()]),
        ingredients: Some(vec!["cream".into(), "sugar".into()]),
        allergy_info: "may contain wheat".into(),
        dietary_certification: "Kosher".into(),
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: serde_json::Value,
}

impl Reply {
    pub fn message(&self) -> &str {
        self.json["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub async fn seed(&self, id: &str) {
        self.products
            .create(&sample_product(id))
            .await
            .expect("seed product");
    }

    pub async fn send(&self, request: Request<Body>) -> Reply {
        let resp = self.router.clone().oneshot(request).await.expect("request");
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).expect("parse JSON")
        };
        Reply { status, headers, json }
    }

    pub async fn post_credentials(&self, uri: &str, username: &str, password: &str) -> Reply {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, basic(username, password))
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    pub async fn signup(&self, username: &str) -> Reply {
        self.post_credentials("/api/users/signup", username, PASSWORD).await
    }

    pub async fn signup_admin(&self, username: &str) -> Reply {
        self.post_credentials("/api/users/admin", username, PASSWORD).await
    }

    /// Log in and return the `name=value` pair to send back as `Cookie`.
    pub async fn login(&self, username: &str) -> String {
        let reply = self.post_credentials("/api/users/login", username, PASSWORD).await;
        assert_eq!(reply.status, StatusCode::OK, "login failed: {:?}", reply.json);
        session_cookie(&reply.headers).expect("session cookie")
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }
}

/// The `session_token=...` pair from a `Set-Cookie` header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session_token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
