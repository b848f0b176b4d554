use async_trait::async_trait;
use std::fmt;

use crate::domain::state::Snapshot;

// Thermostat view exposed by the Nest-style integration.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermostatReading {
    pub temperature: f64,
    pub humidity: f64,
    pub mode: String,
    pub target: f64,
}

// Usage estimate exposed by the Sense-style integration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyEstimate {
    pub current_power: u64,
    pub daily_usage: u64,
    pub monthly_usage: u64,
}

// Failure talking to an external integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamStubError {
    pub provider: &'static str,
    pub message: String,
}

impl fmt::Display for UpstreamStubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} upstream error: {}", self.provider, self.message)
    }
}

impl std::error::Error for UpstreamStubError {}

// Port for thermostat integrations.
#[async_trait]
pub trait ThermostatProvider: Send + Sync {
    async fn thermostat(&self, snapshot: &Snapshot) -> Result<ThermostatReading, UpstreamStubError>;
}

// Port for whole-home energy monitor integrations.
#[async_trait]
pub trait EnergyMonitorProvider: Send + Sync {
    async fn energy(&self, snapshot: &Snapshot) -> Result<EnergyEstimate, UpstreamStubError>;
}
