#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use skywatch::config::{Config, ProviderConfig};
use skywatch::web::{build_router, AppState};

pub const SATELLITES_KEY: &str = "sat-secret";
pub const IMAGERY_KEY: &str = "img-secret";
pub const WEATHER_KEY: &str = "wx-secret";

#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Bytes,
    pub delay: Duration,
}

impl Canned {
    pub fn json(body: &'static str) -> Self {
        Self::status(StatusCode::OK, body)
    }

    pub fn status(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: Bytes::from_static(body.as_bytes()),
            delay: Duration::ZERO,
        }
    }

    pub fn bytes(content_type: &'static str, body: &'static [u8]) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: Bytes::from_static(body),
            delay: Duration::ZERO,
        }
    }

    /// Holds the response back for `millis` before answering.
    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

/// A loopback HTTP service that records every request URI and answers with
/// canned responses keyed by full URI first, then by path.
#[derive(Clone)]
pub struct FakeService {
    requests: Arc<Mutex<Vec<String>>>,
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    fallback: Arc<Mutex<Canned>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            requests: Arc::default(),
            routes: Arc::default(),
            fallback: Arc::new(Mutex::new(Canned::status(
                StatusCode::NOT_FOUND,
                r#"{"status":404,"message":"Not Found"}"#,
            ))),
        }
    }

    pub fn respond(&self, path: &str, canned: Canned) {
        self.routes.lock().unwrap().insert(path.to_string(), canned);
    }

    pub fn respond_to_all(&self, canned: Canned) {
        *self.fallback.lock().unwrap() = canned;
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn spawn(&self) -> SocketAddr {
        let app = Router::new().fallback(answer).with_state(self.clone());
        spawn_router(app).await
    }
}

async fn answer(State(fake): State<FakeService>, uri: Uri) -> Response {
    fake.requests.lock().unwrap().push(uri.to_string());
    let canned = {
        let routes = fake.routes.lock().unwrap();
        routes
            .get(&uri.to_string())
            .or_else(|| routes.get(uri.path()))
            .cloned()
    }
    .unwrap_or_else(|| fake.fallback.lock().unwrap().clone());
    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }
    (
        canned.status,
        [(header::CONTENT_TYPE, canned.content_type)],
        canned.body,
    )
        .into_response()
}

pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Gateway config whose three providers live under `/sat`, `/img` and `/wx` of `upstream`.
pub fn gateway_config(upstream: SocketAddr) -> Config {
    let provider = |prefix: &str, key: &str| ProviderConfig {
        base_url: Some(format!("http://{}/{}", upstream, prefix)),
        api_key: Some(key.to_string()),
    };
    let mut config = Config::default();
    config.upstream.satellites = provider("sat", SATELLITES_KEY);
    config.upstream.imagery = provider("img", IMAGERY_KEY);
    config.upstream.weather = provider("wx", WEATHER_KEY);
    config.upstream.timeout_secs = Some(5);
    config
}

pub async fn spawn_gateway(config: Config) -> SocketAddr {
    let state = AppState::new(config).unwrap();
    spawn_router(build_router(state)).await
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
