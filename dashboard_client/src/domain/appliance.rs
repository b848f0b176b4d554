use crate::domain::errors::ClientError;
use std::{fmt, str::FromStr};

/// Appliances the dashboard knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appliance {
    Refrigerator,
    WashingMachine,
    Dishwasher,
    Oven,
    Tv,
}

impl Appliance {
    pub const COUNT: usize = 5;

    pub const ALL: [Appliance; Self::COUNT] = [
        Appliance::Refrigerator,
        Appliance::WashingMachine,
        Appliance::Dishwasher,
        Appliance::Oven,
        Appliance::Tv,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Appliance::Refrigerator => "refrigerator",
            Appliance::WashingMachine => "washing_machine",
            Appliance::Dishwasher => "dishwasher",
            Appliance::Oven => "oven",
            Appliance::Tv => "tv",
        }
    }

    /// Human-readable name used in notifications.
    pub const fn label(self) -> &'static str {
        match self {
            Appliance::Refrigerator => "refrigerator",
            Appliance::WashingMachine => "washing machine",
            Appliance::Dishwasher => "dishwasher",
            Appliance::Oven => "oven",
            Appliance::Tv => "tv",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Appliance {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Appliance::ALL
            .into_iter()
            .find(|appliance| appliance.id() == s)
            .ok_or_else(|| ClientError::InvalidAppliance { id: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplianceStatus {
    On,
    Off,
}

impl ApplianceStatus {
    pub fn flipped(self) -> Self {
        match self {
            ApplianceStatus::On => ApplianceStatus::Off,
            ApplianceStatus::Off => ApplianceStatus::On,
        }
    }
}

impl fmt::Display for ApplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplianceStatus::On => f.write_str("On"),
            ApplianceStatus::Off => f.write_str("Off"),
        }
    }
}
