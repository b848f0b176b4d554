// Stub adapters for the external home integrations.

pub mod nest;
pub mod sense;

pub use nest::NestStub;
pub use sense::SenseStub;
