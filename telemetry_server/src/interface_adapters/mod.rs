// Interface adapters: wire protocol, HTTP/WebSocket handling, and integration stubs.

pub mod clients;
pub mod http;
pub mod net;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod utils;
