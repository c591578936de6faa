use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Planet identifier. On the wire this is the planet's line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanetId(pub u32);

/// Fleet identifier, stable only within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FleetId(pub u32);

impl PlanetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FleetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FleetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
