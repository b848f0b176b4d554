// Shared primitives for bootstrapping telemetry servers in integration tests.
#![allow(dead_code)]

use std::{
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, OnceLock},
    time::Duration,
};
use telemetry_server::ServerSettings;

// Global base URL for the shared server, set once it has bound its port.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the shared server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

pub fn settings(tick_interval: Duration) -> ServerSettings {
    ServerSettings {
        tick_interval,
        seed: Some(42),
        nest_api_key: "test_key".to_string(),
        sense_api_key: "test_key".to_string(),
    }
}

// Ensure the shared test server is running and return its base URL.
// Its state is shared by every test in the binary, so only use it for read-only checks.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                telemetry_server::run_with_settings(listener, settings(Duration::from_millis(100)))
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Start a private server on the current runtime and return its `host:port`.
// Use this when a test needs the untouched initial state.
pub async fn spawn_server(tick_interval: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(telemetry_server::run_with_settings(
        listener,
        settings(tick_interval),
    ));
    addr.to_string()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
