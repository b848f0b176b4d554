use crate::domain::Snapshot;
use crate::domain::ports::{ThermostatProvider, ThermostatReading, UpstreamStubError};
use async_trait::async_trait;

const DEFAULT_MODE: &str = "heat";
const DEFAULT_TARGET: f64 = 22.0;

// Stand-in for the Nest thermostat API; reports the simulated room climate.
#[derive(Clone)]
pub struct NestStub {
    // Held for a real client; the stub never sends it anywhere.
    #[allow(dead_code)]
    api_key: String,
}

impl NestStub {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ThermostatProvider for NestStub {
    async fn thermostat(
        &self,
        snapshot: &Snapshot,
    ) -> Result<ThermostatReading, UpstreamStubError> {
        Ok(ThermostatReading {
            temperature: snapshot.environment.temperature,
            humidity: snapshot.environment.humidity,
            mode: DEFAULT_MODE.to_string(),
            target: DEFAULT_TARGET,
        })
    }
}
