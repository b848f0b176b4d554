// Server telemetry as the renderer consumes it.

use crate::domain::appliance::{Appliance, ApplianceStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplianceReading {
    pub power: u64,
    pub status: ApplianceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_power: u64,
    // Only appliances this client knows; unknown ids are dropped at decode time.
    pub appliances: Vec<(Appliance, ApplianceReading)>,
    pub water_total: u64,
    pub water_flow: u64,
    pub water_temperature: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub air_quality: String,
}
