/// Tuning for indoor temperature and humidity drift.

#[derive(Debug, Clone, Copy)]
pub struct ClimateTuning {
    /// Width of the per-tick temperature step, centered on zero (degrees C).
    pub temperature_step: f64,

    /// Width of the per-tick humidity step, centered on zero (percent).
    pub humidity_step: f64,

    pub min_temperature: f64,
    pub max_temperature: f64,
    pub min_humidity: f64,
    pub max_humidity: f64,
}

impl Default for ClimateTuning {
    fn default() -> Self {
        Self {
            temperature_step: 0.5,
            humidity_step: 2.0,
            min_temperature: 18.0,
            max_temperature: 28.0,
            min_humidity: 30.0,
            max_humidity: 70.0,
        }
    }
}
