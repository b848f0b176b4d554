// Use-case level inputs/outputs for the telemetry task.

use crate::domain::{ApplianceStatus, ApplianceUpdate, Snapshot};

#[derive(Debug, Clone)]
pub enum TelemetryCommand {
    // The appliance id is validated by the telemetry task, not by the sender.
    SetApplianceStatus {
        appliance: String,
        status: ApplianceStatus,
    },
}

#[derive(Debug, Clone)]
pub enum TelemetryUpdate {
    // Full state after a simulation tick.
    Snapshot(Snapshot),
    // Narrow delta after a command.
    Appliance(ApplianceUpdate),
}
