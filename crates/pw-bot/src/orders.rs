//! Validating order sink used for live games.

use std::collections::BTreeMap;
use std::io::{self, Write};

use thiserror::Error;

use pw_core::{Order, OrderSink, Owner, PlanetId, Ships, Snapshot};

use crate::protocol;

/// Why an order never reached the server.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OrderRejection {
    #[error("order moves no ships")]
    Empty,

    #[error("planet {0} does not exist")]
    UnknownPlanet(PlanetId),

    #[error("planet {0} is not ours")]
    NotOurs(PlanetId),

    #[error("planet {0} cannot send ships to itself")]
    SelfTarget(PlanetId),

    #[error("planet {planet} has {available} uncommitted ships, {requested} requested")]
    Overcommitted {
        planet: PlanetId,
        requested: Ships,
        available: Ships,
    },
}

/// Collects the orders of one turn, accepting only those the server would.
///
/// Ships committed by earlier orders this turn are subtracted from the source planet, so two
/// branches of the tree can never spend the same ships twice.
pub struct OrderBook<'a, S> {
    state: &'a S,
    committed: BTreeMap<PlanetId, Ships>,
    accepted: Vec<Order>,
}

impl<'a, S> OrderBook<'a, S>
where
    S: Snapshot,
{
    pub fn new(state: &'a S) -> Self {
        Self {
            state,
            committed: BTreeMap::new(),
            accepted: Vec::new(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.accepted
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Ships still free to leave `planet` this turn.
    pub fn available(&self, planet: PlanetId) -> Ships {
        let ships = self.state.planet(planet).map_or(0, |p| p.ships);
        ships - self.committed.get(&planet).copied().unwrap_or(0)
    }

    pub fn validate(&self, order: &Order) -> Result<(), OrderRejection> {
        if order.is_noop() {
            return Err(OrderRejection::Empty);
        }
        let source = self
            .state
            .planet(order.source)
            .ok_or(OrderRejection::UnknownPlanet(order.source))?;
        if self.state.planet(order.destination).is_none() {
            return Err(OrderRejection::UnknownPlanet(order.destination));
        }
        if source.owner != Owner::Ally {
            return Err(OrderRejection::NotOurs(order.source));
        }
        if order.source == order.destination {
            return Err(OrderRejection::SelfTarget(order.source));
        }
        let available = self.available(order.source);
        if order.ships > available {
            return Err(OrderRejection::Overcommitted {
                planet: order.source,
                requested: order.ships,
                available,
            });
        }
        Ok(())
    }

    /// Write the accepted orders and the closing `go`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        protocol::write_orders(out, &self.accepted)
    }
}

impl<S> OrderSink for OrderBook<'_, S>
where
    S: Snapshot,
{
    fn submit(&mut self, order: &Order) -> bool {
        match self.validate(order) {
            Ok(()) => {
                *self.committed.entry(order.source).or_insert(0) += order.ships;
                self.accepted.push(*order);
                true
            }
            Err(reason) => {
                tracing::debug!(?order, %reason, "order rejected");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_core::{GameState, Planet};

    fn state() -> GameState {
        GameState::new(
            vec![
                Planet::new(0, Owner::Ally, 30, 2),
                Planet::new(1, Owner::Enemy, 30, 2),
                Planet::new(2, Owner::Neutral, 5, 1),
            ],
            Vec::new(),
        )
    }

    fn order(source: u32, destination: u32, ships: Ships) -> Order {
        Order {
            source: PlanetId(source),
            destination: PlanetId(destination),
            ships,
            arrival_turns: 1,
        }
    }

    #[test]
    fn commitments_accumulate_per_source() {
        let state = state();
        let mut book = OrderBook::new(&state);

        assert!(book.submit(&order(0, 1, 20)));
        assert_eq!(book.available(PlanetId(0)), 10);
        assert!(!book.submit(&order(0, 2, 11)));
        assert!(book.submit(&order(0, 2, 10)));
        assert_eq!(book.len(), 2);
        assert_eq!(book.available(PlanetId(0)), 0);
    }

    #[test]
    fn rejects_what_the_server_would() {
        let state = state();
        let book = OrderBook::new(&state);

        assert_eq!(book.validate(&order(0, 1, 0)), Err(OrderRejection::Empty));
        assert_eq!(
            book.validate(&order(0, 9, 1)),
            Err(OrderRejection::UnknownPlanet(PlanetId(9)))
        );
        assert_eq!(
            book.validate(&order(1, 0, 1)),
            Err(OrderRejection::NotOurs(PlanetId(1)))
        );
        assert_eq!(
            book.validate(&order(0, 0, 1)),
            Err(OrderRejection::SelfTarget(PlanetId(0)))
        );
        assert_eq!(
            book.validate(&order(0, 1, 31)),
            Err(OrderRejection::Overcommitted {
                planet: PlanetId(0),
                requested: 31,
                available: 30,
            })
        );
    }
}
