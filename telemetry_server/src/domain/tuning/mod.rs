// Simulation tuning, kept apart from runtime configuration (ports, tick period, capacities).

pub mod climate;
pub mod energy;
pub mod water;

pub use climate::ClimateTuning;
pub use energy::EnergyTuning;
pub use water::WaterTuning;

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationTuning {
    pub energy: EnergyTuning,
    pub water: WaterTuning,
    pub climate: ClimateTuning,
}
