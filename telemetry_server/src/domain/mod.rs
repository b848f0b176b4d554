// Domain layer: telemetry state, simulation rules, and invariants.

pub mod errors;
pub mod ports;
pub mod state;
pub mod store;
pub mod systems;
pub mod tuning;

pub use errors::InvalidApplianceError;
pub use state::{
    Appliance, ApplianceReading, ApplianceStatus, ApplianceTable, ApplianceUpdate, Energy,
    Environment, Snapshot, Water,
};
pub use store::StateStore;
