use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    // Command attempted while the transport is down.
    NotConnected,
    // Appliance id outside the fixed set.
    InvalidAppliance { id: String },
    // Connection failed, dropped, or a background task is gone.
    Transport { message: String },
    // Auxiliary endpoint poll failed.
    UpstreamStub {
        endpoint: &'static str,
        message: String,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotConnected => f.write_str("Not connected to server"),
            ClientError::InvalidAppliance { id } => write!(f, "unknown appliance: {id}"),
            ClientError::Transport { message } => write!(f, "transport error: {message}"),
            ClientError::UpstreamStub { endpoint, message } => {
                write!(f, "upstream error from {endpoint}: {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}
