// Display-ready view model. Every field holds the text a dashboard would show.

use crate::domain::appliance::{Appliance, ApplianceStatus};
use crate::domain::connection::ConnectionState;
use crate::domain::telemetry::{ApplianceReading, Snapshot};

const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceView {
    pub power: String,
    pub status: ApplianceStatus,
    /// Transient highlight after a reading changes.
    pub updating: bool,
    pulse: u64,
}

impl Default for ApplianceView {
    fn default() -> Self {
        Self {
            power: "0".to_string(),
            status: ApplianceStatus::Off,
            updating: false,
            pulse: 0,
        }
    }
}

/// Identifies one "updating" highlight so an older timer cannot clear a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub appliance: Appliance,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub connection: ConnectionState,
    pub total_power: String,
    appliances: [ApplianceView; Appliance::COUNT],
    pub water_flow: String,
    pub water_temperature: String,
    pub water_total: String,
    pub temperature: String,
    pub humidity: String,
    pub air_quality: String,
    pub thermostat_target: String,
    pub daily_estimate: String,
    next_pulse: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            total_power: "0".to_string(),
            appliances: Default::default(),
            water_flow: "0".to_string(),
            water_temperature: PLACEHOLDER.to_string(),
            water_total: "0".to_string(),
            temperature: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            air_quality: PLACEHOLDER.to_string(),
            thermostat_target: PLACEHOLDER.to_string(),
            daily_estimate: PLACEHOLDER.to_string(),
            next_pulse: 0,
        }
    }
}

impl Dashboard {
    pub fn appliance(&self, appliance: Appliance) -> &ApplianceView {
        &self.appliances[appliance.slot()]
    }

    pub fn appliances(&self) -> impl Iterator<Item = (Appliance, &ApplianceView)> {
        Appliance::ALL.into_iter().zip(self.appliances.iter())
    }

    /// Aggregates first, then every appliance through the single-appliance path.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Vec<Pulse> {
        self.total_power = snapshot.total_power.to_string();

        self.water_flow = snapshot.water_flow.to_string();
        self.water_temperature = snapshot.water_temperature.to_string();
        self.water_total = snapshot.water_total.to_string();

        self.temperature = format!("{:.1}", snapshot.temperature);
        self.humidity = format!("{:.0}", snapshot.humidity);
        self.air_quality = snapshot.air_quality.clone();

        self.daily_estimate = format!("{:.2}", snapshot.total_power as f64 * 24.0 / 1000.0);

        snapshot
            .appliances
            .iter()
            .map(|(appliance, reading)| self.apply_appliance(*appliance, *reading))
            .collect()
    }

    /// Aggregates are left as they are until the next snapshot.
    pub fn apply_appliance(&mut self, appliance: Appliance, reading: ApplianceReading) -> Pulse {
        self.next_pulse += 1;
        let generation = self.next_pulse;

        let view = &mut self.appliances[appliance.slot()];
        view.power = reading.power.to_string();
        view.status = reading.status;
        view.updating = true;
        view.pulse = generation;

        Pulse {
            appliance,
            generation,
        }
    }

    /// Returns whether the highlight was cleared.
    pub fn clear_pulse(&mut self, pulse: Pulse) -> bool {
        let view = &mut self.appliances[pulse.appliance.slot()];
        if view.pulse != pulse.generation || !view.updating {
            return false;
        }
        view.updating = false;
        true
    }

    /// Status a toggle should request, based on what is currently displayed.
    pub fn toggle_target(&self, appliance: Appliance) -> ApplianceStatus {
        self.appliance(appliance).status.flipped()
    }

    pub fn set_thermostat_target(&mut self, target: f64) {
        self.thermostat_target = target.to_string();
    }

    pub fn set_daily_usage(&mut self, watt_hours: u64) {
        self.daily_estimate = format!("{:.2}", watt_hours as f64 / 1000.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}
