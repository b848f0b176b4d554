// Wire DTOs for the dashboard WebSocket and the auxiliary JSON endpoints.

use crate::domain::{
    Appliance, ApplianceReading, ApplianceStatus, EnergyEstimate, Snapshot, ThermostatReading,
};
use crate::use_cases::{OutboundCommand, ServerEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    InitialData(SnapshotDto),
    DataUpdate(SnapshotDto),
    ApplianceUpdate(ApplianceUpdateDto),
}

impl ServerMessage {
    /// `None` when the message only names appliances this client does not know.
    pub fn into_event(self) -> Option<ServerEvent> {
        match self {
            ServerMessage::InitialData(snapshot) => {
                Some(ServerEvent::InitialData(snapshot.into_domain()))
            }
            ServerMessage::DataUpdate(snapshot) => {
                Some(ServerEvent::DataUpdate(snapshot.into_domain()))
            }
            ServerMessage::ApplianceUpdate(update) => {
                let appliance = known_appliance(&update.appliance)?;
                Some(ServerEvent::ApplianceUpdate {
                    appliance,
                    reading: update.data.into(),
                })
            }
        }
    }
}

fn known_appliance(id: &str) -> Option<Appliance> {
    match id.parse::<Appliance>() {
        Ok(appliance) => Some(appliance),
        Err(err) => {
            debug!(error = %err, "ignoring unknown appliance");
            None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    RequestInitialData,
    ToggleAppliance(TogglePayload),
}

#[derive(Debug, Clone, Serialize)]
pub struct TogglePayload {
    pub appliance: &'static str,
    pub status: ApplianceStatusDto,
}

impl From<OutboundCommand> for ClientMessage {
    fn from(command: OutboundCommand) -> Self {
        match command {
            OutboundCommand::RequestInitialData => ClientMessage::RequestInitialData,
            OutboundCommand::ToggleAppliance { appliance, status } => {
                ClientMessage::ToggleAppliance(TogglePayload {
                    appliance: appliance.id(),
                    status: status.into(),
                })
            }
        }
    }
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

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApplianceReadingDto {
    pub power: u64,
    pub status: ApplianceStatusDto,
}

impl From<ApplianceReadingDto> for ApplianceReading {
    fn from(reading: ApplianceReadingDto) -> Self {
        Self {
            power: reading.power,
            status: reading.status.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplianceUpdateDto {
    pub appliance: String,
    pub data: ApplianceReadingDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDto {
    pub energy: EnergyDto,
    pub water: WaterDto,
    pub environment: EnvironmentDto,
}

impl SnapshotDto {
    pub fn into_domain(self) -> Snapshot {
        let appliances = self
            .energy
            .appliances
            .into_iter()
            .filter_map(|(id, reading)| {
                known_appliance(&id).map(|appliance| (appliance, reading.into()))
            })
            .collect();

        Snapshot {
            total_power: self.energy.total,
            appliances,
            water_total: self.water.total,
            water_flow: self.water.flow,
            water_temperature: self.water.temperature,
            temperature: self.environment.temperature,
            humidity: self.environment.humidity,
            air_quality: self.environment.air_quality,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnergyDto {
    pub total: u64,
    pub appliances: BTreeMap<String, ApplianceReadingDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaterDto {
    pub total: u64,
    pub flow: u64,
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentDto {
    pub temperature: f64,
    pub humidity: f64,
    pub air_quality: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThermostatDto {
    pub temperature: f64,
    pub humidity: f64,
    pub mode: String,
    pub target: f64,
}

impl From<ThermostatDto> for ThermostatReading {
    fn from(dto: ThermostatDto) -> Self {
        Self {
            temperature: dto.temperature,
            humidity: dto.humidity,
            mode: dto.mode,
            target: dto.target,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnergyEstimateDto {
    pub current_power: u64,
    pub daily_usage: u64,
    pub monthly_usage: u64,
}

impl From<EnergyEstimateDto> for EnergyEstimate {
    fn from(dto: EnergyEstimateDto) -> Self {
        Self {
            current_power: dto.current_power,
            daily_usage: dto.daily_usage,
            monthly_usage: dto.monthly_usage,
        }
    }
}

/// Body of a non-2xx response from the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot_json() -> serde_json::Value {
        json!({
            "energy": {
                "total": 1500,
                "appliances": {
                    "refrigerator": {"power": 1500, "status": "on"},
                    "microwave": {"power": 0, "status": "off"}
                }
            },
            "water": {"total": 12, "flow": 4, "temperature": 20},
            "environment": {"temperature": 22.5, "humidity": 44.0, "air_quality": "good"}
        })
    }

    #[test]
    fn snapshot_drops_unknown_appliances() {
        let raw = json!({"type": "initialData", "data": snapshot_json()});
        let message: ServerMessage = serde_json::from_value(raw).unwrap();

        let Some(ServerEvent::InitialData(snapshot)) = message.into_event() else {
            panic!("expected initial data");
        };
        assert_eq!(snapshot.total_power, 1500);
        assert_eq!(
            snapshot.appliances,
            vec![(
                Appliance::Refrigerator,
                ApplianceReading {
                    power: 1500,
                    status: ApplianceStatus::On,
                }
            )]
        );
        assert_eq!(snapshot.water_temperature, 20.0);
    }

    #[test]
    fn appliance_update_for_unknown_id_is_ignored() {
        let raw = json!({
            "type": "applianceUpdate",
            "data": {"appliance": "microwave", "data": {"power": 0, "status": "off"}}
        });
        let message: ServerMessage = serde_json::from_value(raw).unwrap();

        assert!(message.into_event().is_none());
    }

    #[test]
    fn outbound_commands_use_event_names() {
        let toggle = ClientMessage::from(OutboundCommand::ToggleAppliance {
            appliance: Appliance::WashingMachine,
            status: ApplianceStatus::On,
        });
        assert_eq!(
            serde_json::to_value(toggle).unwrap(),
            json!({
                "type": "toggleAppliance",
                "data": {"appliance": "washing_machine", "status": "on"}
            })
        );

        let request = ClientMessage::from(OutboundCommand::RequestInitialData);
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"type": "requestInitialData"})
        );
    }
}
