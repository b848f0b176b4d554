// Wire protocol DTOs and conversions for the dashboard WebSocket and the JSON API.

use crate::domain::ports::{EnergyEstimate, ThermostatReading};
use crate::domain::{
    ApplianceReading, ApplianceStatus, ApplianceUpdate, Energy, Environment, Snapshot, Water,
};
use crate::use_cases::TelemetryUpdate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Messages the server sends to connected dashboards over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    // Sent once, right after the connection is established.
    InitialData(SnapshotDto),
    // Full state after every tick (and in reply to requestInitialData).
    DataUpdate(SnapshotDto),
    // Narrow delta after a toggle command.
    ApplianceUpdate(ApplianceUpdateDto),
}

impl From<TelemetryUpdate> for ServerMessage {
    fn from(update: TelemetryUpdate) -> Self {
        match update {
            TelemetryUpdate::Snapshot(snapshot) => ServerMessage::DataUpdate(snapshot.into()),
            TelemetryUpdate::Appliance(update) => ServerMessage::ApplianceUpdate(update.into()),
        }
    }
}

/// Messages dashboards send to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    RequestInitialData,
    ToggleAppliance(TogglePayload),
}

/// Payload for a toggle command. The appliance id is validated downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct TogglePayload {
    pub appliance: String,
    pub status: ApplianceStatusDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplianceStatusDto {
    On,
    Off,
}

impl From<ApplianceStatus> for ApplianceStatusDto {
    fn from(status: ApplianceStatus) -> Self {
        match status {
            ApplianceStatus::On => ApplianceStatusDto::On,
            ApplianceStatus::Off => ApplianceStatusDto::Off,
        }
    }
}

impl From<ApplianceStatusDto> for ApplianceStatus {
    fn from(status: ApplianceStatusDto) -> Self {
        match status {
            ApplianceStatusDto::On => ApplianceStatus::On,
            ApplianceStatusDto::Off => ApplianceStatus::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ApplianceReadingDto {
    pub power: u32,
    pub status: ApplianceStatusDto,
}

impl From<ApplianceReading> for ApplianceReadingDto {
    fn from(reading: ApplianceReading) -> Self {
        Self {
            power: reading.power,
            status: reading.status.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplianceUpdateDto {
    pub appliance: &'static str,
    pub data: ApplianceReadingDto,
}

impl From<ApplianceUpdate> for ApplianceUpdateDto {
    fn from(update: ApplianceUpdate) -> Self {
        Self {
            appliance: update.appliance.id(),
            data: update.reading.into(),
        }
    }
}

/// Full snapshot as sent on the wire and returned by `/api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDto {
    pub energy: EnergyDto,
    pub water: WaterDto,
    pub environment: EnvironmentDto,
}

impl From<Snapshot> for SnapshotDto {
    fn from(snapshot: Snapshot) -> Self {
        Self::from(&snapshot)
    }
}

impl From<&Snapshot> for SnapshotDto {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            energy: EnergyDto::from(&snapshot.energy),
            water: WaterDto::from(&snapshot.water),
            environment: EnvironmentDto::from(&snapshot.environment),
        }
    }
}

pub type AppliancesDto = BTreeMap<&'static str, ApplianceReadingDto>;

#[derive(Debug, Clone, Serialize)]
pub struct EnergyDto {
    pub total: u32,
    pub appliances: AppliancesDto,
}

impl From<&Energy> for EnergyDto {
    fn from(energy: &Energy) -> Self {
        Self {
            total: energy.total,
            appliances: energy
                .appliances
                .iter()
                .map(|(appliance, reading)| (appliance.id(), ApplianceReadingDto::from(reading)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WaterDto {
    pub total: u64,
    pub flow: u32,
    pub temperature: f64,
}

impl From<&Water> for WaterDto {
    fn from(water: &Water) -> Self {
        Self {
            total: water.total,
            flow: water.flow,
            temperature: water.temperature,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentDto {
    pub temperature: f64,
    pub humidity: f64,
    pub air_quality: String,
}

impl From<&Environment> for EnvironmentDto {
    fn from(env: &Environment) -> Self {
        Self {
            temperature: env.temperature,
            humidity: env.humidity,
            air_quality: env.air_quality.clone(),
        }
    }
}

/// Response for `/api/energy/current`.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyCurrentDto {
    pub total: u32,
    pub timestamp: String,
}

/// Response for `/api/water/current`.
#[derive(Debug, Clone, Serialize)]
pub struct WaterCurrentDto {
    pub total: u64,
    pub flow: u32,
    pub temperature: f64,
    pub timestamp: String,
}

/// Response for `/api/nest/thermostat`.
#[derive(Debug, Clone, Serialize)]
pub struct ThermostatDto {
    pub temperature: f64,
    pub humidity: f64,
    pub mode: String,
    pub target: f64,
}

impl From<ThermostatReading> for ThermostatDto {
    fn from(reading: ThermostatReading) -> Self {
        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            mode: reading.mode,
            target: reading.target,
        }
    }
}

/// Response for `/api/sense/energy`.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyEstimateDto {
    pub current_power: u64,
    pub daily_usage: u64,
    pub monthly_usage: u64,
}

impl From<EnergyEstimate> for EnergyEstimateDto {
    fn from(estimate: EnergyEstimate) -> Self {
        Self {
            current_power: estimate.current_power,
            daily_usage: estimate.daily_usage,
            monthly_usage: estimate.monthly_usage,
        }
    }
}
