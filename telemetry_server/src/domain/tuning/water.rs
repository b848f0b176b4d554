/// Tuning for simulated water draw.

#[derive(Debug, Clone, Copy)]
pub struct WaterTuning {
    /// Probability that water flows during a tick.
    pub flow_chance: f64,

    /// Upper bound of the per-tick flow (exclusive).
    pub max_flow: u32,
}

impl Default for WaterTuning {
    fn default() -> Self {
        Self {
            flow_chance: 0.3,
            max_flow: 10,
        }
    }
}
