use crate::domain::{ClientError, EnergyEstimate, TelemetryApi, ThermostatReading};
use crate::interface_adapters::protocol::{EnergyEstimateDto, ErrorResponse, ThermostatDto};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const THERMOSTAT_PATH: &str = "/api/nest/thermostat";
const ENERGY_ESTIMATE_PATH: &str = "/api/sense/energy";

// Thin wrapper around reqwest for the auxiliary read-only endpoints.
#[derive(Clone)]
pub struct HttpTelemetryApi {
    http: Client,
    pub base_url: String,
}

impl HttpTelemetryApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Transport {
                message: err.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, ClientError> {
        let upstream = |message: String| ClientError::UpstreamStub {
            endpoint: path,
            message,
        };

        let url = format!("{}{path}", self.base_url);
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| upstream(err.to_string()))?;
        let status = res.status();

        // Keep the server's error text when it sent one.
        if !status.is_success() {
            let message = match res.json::<ErrorResponse>().await {
                Ok(body) => format!("{status}: {}", body.error),
                Err(_) => status.to_string(),
            };
            return Err(upstream(message));
        }

        res.json::<T>().await.map_err(|err| upstream(err.to_string()))
    }
}

#[async_trait]
impl TelemetryApi for HttpTelemetryApi {
    async fn thermostat(&self) -> Result<ThermostatReading, ClientError> {
        self.get_json::<ThermostatDto>(THERMOSTAT_PATH)
            .await
            .map(ThermostatReading::from)
    }

    async fn energy_estimate(&self) -> Result<EnergyEstimate, ClientError> {
        self.get_json::<EnergyEstimateDto>(ENERGY_ESTIMATE_PATH)
            .await
            .map(EnergyEstimate::from)
    }
}
