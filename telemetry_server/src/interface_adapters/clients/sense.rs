use crate::domain::Snapshot;
use crate::domain::ports::{EnergyEstimate, EnergyMonitorProvider, UpstreamStubError};
use async_trait::async_trait;

const HOURS_PER_DAY: u64 = 24;
const DAYS_PER_MONTH: u64 = 30;

// Stand-in for the Sense energy monitor API; extrapolates from the current draw.
#[derive(Clone)]
pub struct SenseStub {
    #[allow(dead_code)]
    api_key: String,
}

impl SenseStub {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl EnergyMonitorProvider for SenseStub {
    async fn energy(&self, snapshot: &Snapshot) -> Result<EnergyEstimate, UpstreamStubError> {
        let current_power = u64::from(snapshot.energy.total);
        let daily_usage = current_power * HOURS_PER_DAY;
        Ok(EnergyEstimate {
            current_power,
            daily_usage,
            monthly_usage: daily_usage * DAYS_PER_MONTH,
        })
    }
}
