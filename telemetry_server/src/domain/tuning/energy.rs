/// Tuning for appliance power draw.

#[derive(Debug, Clone, Copy)]
pub struct EnergyTuning {
    /// Lowest draw assigned when an appliance is switched on, in watts (inclusive).
    pub min_on_power: u32,

    /// Upper bound of the switch-on draw, in watts (exclusive).
    pub max_on_power: u32,

    /// Largest per-tick drift applied to a running appliance, in watts (either direction).
    pub max_jitter: i64,
}

impl Default for EnergyTuning {
    fn default() -> Self {
        Self {
            min_on_power: 500,
            max_on_power: 2500,
            max_jitter: 25,
        }
    }
}
