// Use-case level inputs/outputs for the renderer.

use crate::domain::{
    Appliance, ApplianceReading, ApplianceStatus, ClientError, EnergyEstimate, Pulse, Snapshot,
    ThermostatReading,
};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    InitialData(Snapshot),
    DataUpdate(Snapshot),
    ApplianceUpdate {
        appliance: Appliance,
        reading: ApplianceReading,
    },
}

/// Commands the renderer hands to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundCommand {
    RequestInitialData,
    ToggleAppliance {
        appliance: Appliance,
        status: ApplianceStatus,
    },
}

#[derive(Debug)]
pub enum RendererEvent {
    Connected,
    Disconnected,
    ConnectionError {
        message: String,
    },
    Server(ServerEvent),
    /// Commands the transport discarded instead of sending.
    CommandsDropped {
        count: usize,
    },
    /// Ask for a fresh snapshot if connected.
    Refresh,
    Toggle {
        appliance: Appliance,
        reply: oneshot::Sender<Result<ApplianceStatus, ClientError>>,
    },
    PulseElapsed(Pulse),
    Thermostat(ThermostatReading),
    EnergyEstimate(EnergyEstimate),
}
