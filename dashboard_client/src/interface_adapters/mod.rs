pub mod clients;
pub mod protocol;
pub mod render;
pub mod transport;
