pub mod poller;
pub mod renderer;
pub mod types;

pub use poller::spawn_poller;
pub use renderer::{RendererHandle, RendererSettings, WELCOME_MESSAGE};
pub use types::{OutboundCommand, RendererEvent, ServerEvent};
