#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PlanetId, Ships, Snapshot, Turns};

/// A proposed ship transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub source: PlanetId,
    pub destination: PlanetId,
    pub ships: Ships,
    pub arrival_turns: Turns,
}

impl Order {
    /// Build an order whose arrival time is the trip length between the two planets.
    pub fn between<S: Snapshot>(
        state: &S,
        source: PlanetId,
        destination: PlanetId,
        ships: Ships,
    ) -> Self {
        Self {
            source,
            destination,
            ships,
            arrival_turns: state.distance(source, destination),
        }
    }

    /// Orders that move nothing are dropped rather than submitted.
    pub fn is_noop(&self) -> bool {
        self.ships <= 0
    }
}

/// Effect sink for orders. `submit` reports whether the order was accepted.
///
/// Rejection is ordinary control flow for the tree, never an error.
pub trait OrderSink {
    fn submit(&mut self, order: &Order) -> bool;
}

/// Accepts every non-empty order and keeps them in submission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingSink {
    pub orders: Vec<Order>,
}

impl OrderSink for RecordingSink {
    fn submit(&mut self, order: &Order) -> bool {
        if order.is_noop() {
            return false;
        }
        self.orders.push(*order);
        true
    }
}

/// Rejects everything. Useful for dry-running a tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OrderSink for NullSink {
    fn submit(&mut self, _order: &Order) -> bool {
        false
    }
}
