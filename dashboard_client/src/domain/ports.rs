use crate::domain::errors::ClientError;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct ThermostatReading {
    pub temperature: f64,
    pub humidity: f64,
    pub mode: String,
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyEstimate {
    pub current_power: u64,
    /// Watt-hours.
    pub daily_usage: u64,
    pub monthly_usage: u64,
}

// The poller depends on this trait, not on the reqwest client.
#[async_trait]
pub trait TelemetryApi: Send + Sync {
    async fn thermostat(&self) -> Result<ThermostatReading, ClientError>;

    async fn energy_estimate(&self) -> Result<EnergyEstimate, ClientError>;
}
