// Read-only JSON API over the latest telemetry snapshot.

use crate::interface_adapters::protocol::{
    AppliancesDto, EnergyCurrentDto, EnergyDto, EnergyEstimateDto, SnapshotDto, ThermostatDto,
    WaterCurrentDto,
};
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::warn;

/// Shared HTTP error payload.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

fn error_response(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ISO-8601 UTC with millisecond precision, e.g. 2024-05-01T12:00:00.000Z.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<SnapshotDto> {
    Json(SnapshotDto::from(&state.telemetry.latest_snapshot()))
}

pub async fn appliances_handler(State(state): State<Arc<AppState>>) -> Json<AppliancesDto> {
    let snapshot = state.telemetry.latest_snapshot();
    Json(EnergyDto::from(&snapshot.energy).appliances)
}

pub async fn energy_current_handler(State(state): State<Arc<AppState>>) -> Json<EnergyCurrentDto> {
    let total = state.telemetry.snapshot_tx.borrow().energy.total;
    Json(EnergyCurrentDto {
        total,
        timestamp: timestamp(),
    })
}

pub async fn water_current_handler(State(state): State<Arc<AppState>>) -> Json<WaterCurrentDto> {
    let water = state.telemetry.snapshot_tx.borrow().water.clone();
    Json(WaterCurrentDto {
        total: water.total,
        flow: water.flow,
        temperature: water.temperature,
        timestamp: timestamp(),
    })
}

pub async fn nest_thermostat_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.telemetry.latest_snapshot();
    match state.thermostat.thermostat(&snapshot).await {
        Ok(reading) => Json(ThermostatDto::from(reading)).into_response(),
        Err(e) => {
            warn!(error = %e, "thermostat integration failed");
            error_response("Failed to fetch Nest data").into_response()
        }
    }
}

pub async fn sense_energy_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.telemetry.latest_snapshot();
    match state.energy_monitor.energy(&snapshot).await {
        Ok(estimate) => Json(EnergyEstimateDto::from(estimate)).into_response(),
        Err(e) => {
            warn!(error = %e, "energy monitor integration failed");
            error_response("Failed to fetch Sense data").into_response()
        }
    }
}
