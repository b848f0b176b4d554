pub mod appliance;
pub mod connection;
pub mod errors;
pub mod ports;
pub mod telemetry;
pub mod view;

// Re-export the domain boundary types and ports.
pub use appliance::{Appliance, ApplianceStatus};
pub use connection::ConnectionState;
pub use errors::ClientError;
pub use ports::{EnergyEstimate, TelemetryApi, ThermostatReading};
pub use telemetry::{ApplianceReading, Snapshot};
pub use view::{ApplianceView, Dashboard, Notification, NotificationLevel, Pulse};
