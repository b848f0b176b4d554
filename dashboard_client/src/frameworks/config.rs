use std::{env, time::Duration};

// Runtime/client configuration.

pub fn server_url() -> String {
    let url = env::var("DASHBOARD_SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3001".to_string());
    url.trim_end_matches('/').to_string()
}

pub fn poll_interval() -> Duration {
    millis_from_env("POLL_INTERVAL_MS", 30_000)
}

pub fn http_timeout() -> Duration {
    millis_from_env("HTTP_TIMEOUT_MS", 5_000)
}

fn millis_from_env(key: &str, default: u64) -> Duration {
    let millis = env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(default);
    Duration::from_millis(millis)
}

/// WebSocket endpoint served next to the JSON API.
pub fn websocket_url(server_url: &str) -> String {
    let base = server_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}/ws")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}/ws")
    } else {
        format!("{base}/ws")
    }
}

pub const RECONNECT_DELAY: Duration = Duration::from_secs(1);
pub const PULSE_DURATION: Duration = Duration::from_millis(300);
// Terminal redraws are coalesced to this rate.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

pub const EVENT_CHANNEL_CAPACITY: usize = 256;
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 64;
pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;
