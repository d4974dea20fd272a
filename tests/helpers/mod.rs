//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tower::ServiceExt;

use taskhub_api::state::AppState;
use taskhub_core::config::AppConfig;
use taskhub_realtime::engine::RealtimeEngine;

/// Router plus the engine behind it, for in-process requests.
pub struct TestApp {
    pub router: Router,
    pub engine: Arc<RealtimeEngine>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig::default();
        let engine = Arc::new(RealtimeEngine::new(config.realtime.clone()));
        let state = AppState {
            config: Arc::new(config),
            realtime: Arc::clone(&engine),
        };

        Self {
            router: taskhub_api::router::build_router(state),
            engine,
        }
    }

    /// Drives one request through the router without binding a port.
    pub async fn request(&self, method: &str, path: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("router should answer");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body should be readable");

        TestResponse {
            status,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    /// Binds an ephemeral port and serves the app, for live WebSocket
    /// clients.
    pub async fn spawn(self) -> SpawnedApp {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral port should bind");
        let addr = listener.local_addr().expect("listener has an addr");

        let router = self.router;
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server");
        });

        SpawnedApp {
            addr,
            engine: self.engine,
            server,
        }
    }
}

/// Status and parsed JSON body of an in-process request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A test app listening on a real TCP port.
pub struct SpawnedApp {
    pub addr: SocketAddr,
    pub engine: Arc<RealtimeEngine>,
    server: JoinHandle<()>,
}

impl SpawnedApp {
    /// Opens a WebSocket connection to the running server.
    pub async fn connect(&self) -> WsClient {
        let url = format!("ws://{}/ws", self.addr);
        let (stream, _) = connect_async(url.as_str()).await.expect("ws connect");
        WsClient { stream }
    }
}

impl Drop for SpawnedApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Client side of a live WebSocket connection.
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn send_text(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .expect("frame should send");
    }

    /// Joins the workspace with the given key string.
    pub async fn join_workspace(&mut self, workspace: &str) {
        let msg = serde_json::json!({ "type": "joinWorkspace", "workspace": workspace });
        self.send_text(&msg.to_string()).await;
    }

    /// Next text frame parsed as JSON. Ping frames are skipped.
    pub async fn recv_json(&mut self) -> Value {
        let frame = tokio::time::timeout(Duration::from_secs(2), self.next_text())
            .await
            .expect("frame should arrive in time");
        serde_json::from_str(&frame).expect("frame should be JSON")
    }

    /// Fails if any text frame shows up within the window.
    pub async fn assert_silent(&mut self, window: Duration) {
        match tokio::time::timeout(window, self.next_text()).await {
            Err(_) => {}
            Ok(frame) => panic!("Expected no frame, got: {}", frame),
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }

    async fn next_text(&mut self) -> String {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(frame))) => return frame.as_str().to_string(),
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {}", e),
                None => panic!("WebSocket closed while waiting for a frame"),
            }
        }
    }
}

/// Polls a condition every 10ms until it holds or 2 seconds pass.
pub async fn wait_for(mut condition: impl FnMut() -> bool, what: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        if tokio::time::Instant::now() > deadline {
            panic!("Timed out waiting for: {}", what);
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
