use std::{env, time::Duration};

// Runtime/server configuration (not simulation tuning).

pub fn http_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

// Placeholder credentials; the stub integrations never send them anywhere.
pub fn nest_api_key() -> String {
    env::var("NEST_API_KEY").unwrap_or_else(|_| "demo_key".to_string())
}

pub fn sense_api_key() -> String {
    env::var("SENSE_API_KEY").unwrap_or_else(|_| "demo_key".to_string())
}

pub fn tick_interval() -> Duration {
    let millis = env::var("TICK_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(2000);
    Duration::from_millis(millis)
}

pub fn sim_seed() -> Option<u64> {
    env::var("SIM_SEED").ok().and_then(|v| v.parse().ok())
}

pub const COMMAND_CHANNEL_CAPACITY: usize = 1024;
pub const UPDATE_BROADCAST_CAPACITY: usize = 128;
