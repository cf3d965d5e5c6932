//! Shared test utilities for Zenith integration tests.

#![allow(dead_code)]

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zenith::health::PollingConfig;
use zenith::probe::Target;

pub const HEALTH_PATH: &str = "/health";

/// Start a mock service answering `GET /health` with `status`.
pub async fn mock_service(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Start a mock service that answers 200 only after `delay`.
pub async fn slow_service(delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(delay))
        .mount(&server)
        .await;
    server
}

pub fn target_for(key: &str, server: &MockServer) -> Target {
    Target::new(key, format!("{}{}", server.uri(), HEALTH_PATH))
}

/// A URL nothing listens on.
pub fn closed_port_target(key: &str) -> Target {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Target::new(key, format!("http://{}{}", addr, HEALTH_PATH))
}

/// Short timings so real-clock tests stay fast.
pub fn fast_polling() -> PollingConfig {
    PollingConfig {
        enabled: true,
        base_interval_ms: 100,
        max_attempts: 3,
        probe_timeout_ms: 300,
    }
}
