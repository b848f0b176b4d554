// Domain-level telemetry snapshot and appliance types.

use crate::domain::errors::InvalidApplianceError;
use std::{fmt, str::FromStr};

/// The fixed set of monitored appliances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
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

    /// Wire identifier used in snapshots and commands.
    pub const fn id(self) -> &'static str {
        match self {
            Appliance::Refrigerator => "refrigerator",
            Appliance::WashingMachine => "washing_machine",
            Appliance::Dishwasher => "dishwasher",
            Appliance::Oven => "oven",
            Appliance::Tv => "tv",
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Appliance {
    type Err = InvalidApplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Appliance::ALL
            .into_iter()
            .find(|appliance| appliance.id() == s)
            .ok_or_else(|| InvalidApplianceError { id: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplianceStatus {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplianceReading {
    /// Instantaneous draw in watts; always 0 while the appliance is off.
    pub power: u32,
    pub status: ApplianceStatus,
}

impl ApplianceReading {
    pub const OFF: Self = Self {
        power: 0,
        status: ApplianceStatus::Off,
    };
}

/// Readings for every appliance, one slot per [`Appliance`].
///
/// A fixed array rather than a map: every appliance always has a reading, so lookups cannot miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceTable {
    readings: [ApplianceReading; Appliance::COUNT],
}

impl ApplianceTable {
    pub fn all_off() -> Self {
        Self {
            readings: [ApplianceReading::OFF; Appliance::COUNT],
        }
    }

    pub fn get(&self, appliance: Appliance) -> ApplianceReading {
        self.readings[appliance.slot()]
    }

    pub(crate) fn get_mut(&mut self, appliance: Appliance) -> &mut ApplianceReading {
        &mut self.readings[appliance.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Appliance, ApplianceReading)> + '_ {
        Appliance::ALL
            .into_iter()
            .map(|appliance| (appliance, self.get(appliance)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ApplianceReading> {
        self.readings.iter_mut()
    }

    pub fn total_power(&self) -> u32 {
        self.readings
            .iter()
            .fold(0u32, |sum, reading| sum.saturating_add(reading.power))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Energy {
    /// Derived from the appliance table; never set directly.
    pub total: u32,
    pub appliances: ApplianceTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Water {
    /// Cumulative volume; never decreases.
    pub total: u64,
    /// Volume drawn during the latest tick.
    pub flow: u32,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub temperature: f64,
    pub humidity: f64,
    pub air_quality: String,
}

/// The complete simulated home state at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub energy: Energy,
    pub water: Water,
    pub environment: Environment,
}

impl Snapshot {
    /// Process-start state: everything off, zero totals.
    pub fn initial() -> Self {
        Self {
            energy: Energy {
                total: 0,
                appliances: ApplianceTable::all_off(),
            },
            water: Water {
                total: 0,
                flow: 0,
                temperature: 20.0,
            },
            environment: Environment {
                temperature: 22.0,
                humidity: 45.0,
                air_quality: "good".to_string(),
            },
        }
    }
}

/// Narrow delta describing one appliance after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplianceUpdate {
    pub appliance: Appliance,
    pub reading: ApplianceReading,
}
