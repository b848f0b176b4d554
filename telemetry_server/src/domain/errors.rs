use std::fmt;

// Raised when a command names an appliance outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidApplianceError {
    pub id: String,
}

impl fmt::Display for InvalidApplianceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown appliance: {}", self.id)
    }
}

impl std::error::Error for InvalidApplianceError {}
