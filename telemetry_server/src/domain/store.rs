// Owned, in-memory telemetry state. The telemetry task is its only writer.

use crate::domain::state::{Appliance, ApplianceStatus, ApplianceUpdate, Snapshot};
use crate::domain::systems::{climate, energy, water};
use crate::domain::tuning::SimulationTuning;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct StateStore {
    snapshot: Snapshot,
    tuning: SimulationTuning,
}

impl StateStore {
    pub fn new(tuning: SimulationTuning) -> Self {
        Self {
            snapshot: Snapshot::initial(),
            tuning,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Apply a switch command. Turning on assigns a fresh draw; turning off zeroes it.
    pub fn set_appliance_status<R: Rng + ?Sized>(
        &mut self,
        appliance: Appliance,
        status: ApplianceStatus,
        rng: &mut R,
    ) -> ApplianceUpdate {
        let reading = self.snapshot.energy.appliances.get_mut(appliance);
        energy::switch_appliance(reading, status, rng, self.tuning.energy);
        let reading = *reading;
        energy::recompute_total(&mut self.snapshot.energy);

        ApplianceUpdate { appliance, reading }
    }

    /// Run one simulation tick over every part of the snapshot.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        energy::tick_energy(&mut self.snapshot.energy, rng, self.tuning.energy);
        water::tick_water(&mut self.snapshot.water, rng, self.tuning.water);
        climate::tick_climate(&mut self.snapshot.environment, rng, self.tuning.climate);
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(SimulationTuning::default())
    }
}
