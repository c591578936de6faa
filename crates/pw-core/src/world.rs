#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FleetId, Owner, PlanetId};

/// Ship counts. Signed so that intermediate forecast math can go negative.
pub type Ships = i64;

/// Turn counts and distances.
pub type Turns = i64;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Planet {
    pub id: PlanetId,
    pub owner: Owner,
    pub ships: Ships,
    pub growth: Ships,
    pub x: f64,
    pub y: f64,
}

impl Planet {
    pub fn new(id: u32, owner: Owner, ships: Ships, growth: Ships) -> Self {
        Self {
            id: PlanetId(id),
            owner,
            ships,
            growth,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fleet {
    pub id: FleetId,
    pub owner: Owner,
    pub ships: Ships,
    pub source: PlanetId,
    pub destination: PlanetId,
    pub total_turns: Turns,
    pub turns_remaining: Turns,
}

impl Fleet {
    pub fn new(
        id: u32,
        owner: Owner,
        ships: Ships,
        source: PlanetId,
        destination: PlanetId,
        turns_remaining: Turns,
    ) -> Self {
        Self {
            id: FleetId(id),
            owner,
            ships,
            source,
            destination,
            total_turns: turns_remaining,
            turns_remaining,
        }
    }
}

/// Read-only view of one turn of the game.
///
/// Implementations must be fully populated before the root node is evaluated and must not change
/// for the duration of one evaluation. `distance` has to be symmetric with `distance(a, a) == 0`.
pub trait Snapshot {
    fn planets(&self) -> &[Planet];

    fn fleets(&self) -> &[Fleet];

    fn distance(&self, a: PlanetId, b: PlanetId) -> Turns;

    fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets().iter().find(|p| p.id == id)
    }

    fn planets_owned_by(&self, owner: Owner) -> impl Iterator<Item = &Planet> + '_ {
        self.planets().iter().filter(move |p| p.owner == owner)
    }

    fn fleets_owned_by(&self, owner: Owner) -> impl Iterator<Item = &Fleet> + '_ {
        self.fleets().iter().filter(move |f| f.owner == owner)
    }
}
