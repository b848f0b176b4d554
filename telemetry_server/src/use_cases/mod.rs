// Use cases layer: the telemetry workflow driving the simulated home.

pub mod telemetry;
pub mod types;

pub use telemetry::{TelemetryHandle, TelemetrySettings};
pub use types::{TelemetryCommand, TelemetryUpdate};
