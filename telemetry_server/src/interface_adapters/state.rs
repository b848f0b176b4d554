use crate::domain::ports::{EnergyMonitorProvider, ThermostatProvider};
use crate::use_cases::TelemetryHandle;
use axum::extract::ws::Utf8Bytes;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    // Commands in, snapshots and updates out.
    pub telemetry: TelemetryHandle,
    // Serialized updates, shared across all connections.
    pub update_bytes_tx: broadcast::Sender<Utf8Bytes>,
    pub thermostat: Arc<dyn ThermostatProvider>,
    pub energy_monitor: Arc<dyn EnergyMonitorProvider>,
}
