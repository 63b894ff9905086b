//! Mock ingestion endpoint shared by the integration tests.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::net::TcpListener as StdTcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request captured by the mock endpoint
#[derive(Debug, Clone)]
pub struct Received {
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
    pub raw: String,
    pub body: Value,
}

#[derive(Clone)]
struct Collector {
    received: Arc<Mutex<Vec<Received>>>,
    status: StatusCode,
    delay: Duration,
}

/// In-process ingestion endpoint recording every POST it receives
pub struct MockIngest {
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockIngest {
    /// Start an endpoint that accepts everything
    pub async fn start() -> Self {
        Self::start_with(StatusCode::OK, Duration::ZERO).await
    }

    /// Start an endpoint answering with `status` after `delay`
    pub async fn start_with(status: StatusCode, delay: Duration) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let collector = Collector {
            received: received.clone(),
            status,
            delay,
        };
        let app = Router::new()
            .route("/api/observability/ingest", post(ingest))
            .with_state(collector);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            received,
        }
    }

    /// Requests received so far
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// The single request received, failing if there were more or fewer
    pub fn only(&self) -> Received {
        let received = self.received();
        assert_eq!(received.len(), 1, "expected exactly one request: {:?}", received);
        received.into_iter().next().unwrap()
    }
}

async fn ingest(State(collector): State<Collector>, headers: HeaderMap, raw: String) -> StatusCode {
    if !collector.delay.is_zero() {
        tokio::time::sleep(collector.delay).await;
    }
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let body = serde_json::from_str(&raw).unwrap_or(Value::Null);
    collector.received.lock().unwrap().push(Received {
        user_agent: header("user-agent"),
        content_type: header("content-type"),
        raw,
        body,
    });
    collector.status
}

/// Base URL of a local port with nothing listening on it
pub fn closed_base_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
