use std::collections::BTreeMap;

use pw_core::{Owner, Planet, Ships, Snapshot, Turns};

/// Projected state of one planet at `turn` turns from now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    pub owner: Owner,
    pub ships: Ships,
    pub turn: Turns,
}

/// Ships landing on one turn, split by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Arrivals {
    ally: Ships,
    enemy: Ships,
}

impl Arrivals {
    fn add(&mut self, owner: Owner, ships: Ships) {
        match owner {
            Owner::Ally => self.ally = self.ally.saturating_add(ships),
            Owner::Enemy => self.enemy = self.enemy.saturating_add(ships),
            Owner::Neutral => {}
        }
    }

    fn of(self, owner: Owner) -> Ships {
        match owner {
            Owner::Ally => self.ally,
            Owner::Enemy => self.enemy,
            Owner::Neutral => 0,
        }
    }
}

/// Every fleet heading for `planet`, batched by arrival turn in ascending order.
fn arrival_schedule<S: Snapshot>(state: &S, planet: &Planet) -> BTreeMap<Turns, Arrivals> {
    let mut schedule = BTreeMap::<Turns, Arrivals>::new();
    for fleet in state.fleets().iter().filter(|f| f.destination == planet.id) {
        schedule
            .entry(fleet.turns_remaining.max(0))
            .or_default()
            .add(fleet.owner, fleet.ships);
    }
    schedule
}

/// Turn-by-turn combat model for a single planet.
///
/// Each turn an owned planet first grows, then the batch of fleets landing that turn fights. Turn
/// 0 is "now": it grows nothing and only resolves fleets that have already arrived. Garrisons
/// saturate at `Ships::MAX` instead of overflowing.
#[derive(Debug, Clone, Copy)]
struct Simulation {
    owner: Owner,
    ships: Ships,
    growth: Ships,
    turn: Turns,
}

impl Simulation {
    fn new(planet: &Planet) -> Self {
        Self {
            owner: planet.owner,
            ships: planet.ships,
            growth: planet.growth,
            turn: 0,
        }
    }

    fn advance_to(&mut self, turn: Turns) {
        if turn <= self.turn {
            return;
        }
        if !self.owner.is_neutral() {
            let grown = self.growth.saturating_mul(turn - self.turn);
            self.ships = self.ships.saturating_add(grown);
        }
        self.turn = turn;
    }

    fn resolve(&mut self, arrivals: Arrivals) {
        match self.owner.opponent() {
            None => {
                // Neutral garrison: the two sides cancel out first, the survivors fight the planet.
                let net = (arrivals.ally - arrivals.enemy).abs();
                if net == 0 {
                    return;
                }
                self.ships -= net;
                if self.ships < 0 {
                    self.owner = if arrivals.ally > arrivals.enemy {
                        Owner::Ally
                    } else {
                        Owner::Enemy
                    };
                    self.ships = -self.ships;
                }
            }
            Some(opponent) => {
                let net = arrivals.of(self.owner) - arrivals.of(opponent);
                self.ships = self.ships.saturating_add(net);
                if self.ships < 0 {
                    self.owner = opponent;
                    self.ships = -self.ships;
                }
            }
        }
    }

    fn forecast(&self) -> Forecast {
        Forecast {
            owner: self.owner,
            ships: self.ships,
            turn: self.turn,
        }
    }
}

/// Simulate `planet` up to and including turn `horizon`.
///
/// A negative horizon returns the planet as it stands, without resolving anything.
pub fn forecast_at<S: Snapshot>(state: &S, planet: &Planet, horizon: Turns) -> Forecast {
    let mut sim = Simulation::new(planet);
    if horizon < 0 {
        return sim.forecast();
    }
    for (&turn, &arrivals) in arrival_schedule(state, planet).range(..=horizon) {
        sim.advance_to(turn);
        sim.resolve(arrivals);
    }
    sim.advance_to(horizon);
    sim.forecast()
}

/// Ships on `planet` after `horizon` turns.
///
/// `horizon <= 0` is the current garrison. Without arrivals inside the horizon this is a linear
/// growth projection (none for neutral planets); otherwise the full combat simulation decides.
pub fn forecast_ship_count<S: Snapshot>(state: &S, planet: &Planet, horizon: Turns) -> Ships {
    if horizon <= 0 {
        return planet.ships;
    }
    let arriving = state
        .fleets()
        .iter()
        .any(|f| f.destination == planet.id && f.turns_remaining <= horizon);
    if !arriving {
        return if planet.owner.is_neutral() {
            planet.ships
        } else {
            planet
                .ships
                .saturating_add(planet.growth.saturating_mul(horizon))
        };
    }
    forecast_at(state, planet, horizon).ships
}

/// Owner of `planet` once every fleet currently in flight towards it has landed.
pub fn forecast_owner<S: Snapshot>(state: &S, planet: &Planet) -> Owner {
    match arrival_schedule(state, planet).keys().next_back() {
        Some(&last) => forecast_at(state, planet, last).owner,
        None => planet.owner,
    }
}

/// First turn on which `planet` changes hands, with the new owner.
pub fn capture_turn<S: Snapshot>(state: &S, planet: &Planet) -> Option<(Turns, Owner)> {
    let mut sim = Simulation::new(planet);
    for (&turn, &arrivals) in &arrival_schedule(state, planet) {
        sim.advance_to(turn);
        sim.resolve(arrivals);
        if sim.owner != planet.owner {
            return Some((turn, sim.owner));
        }
    }
    None
}

/// Ships `planet` could hold after `horizon` turns if every planet of the same owner within reach
/// sent its whole forecast garrison, arriving exactly on time.
pub fn max_reinforcements<S: Snapshot>(state: &S, planet: &Planet, horizon: Turns) -> Ships {
    let own = forecast_ship_count(state, planet, horizon);
    let helpers: Ships = state
        .planets_owned_by(planet.owner)
        .filter(|p| p.id != planet.id)
        .filter_map(|p| {
            let trip = state.distance(planet.id, p.id);
            (trip <= horizon).then(|| forecast_ship_count(state, p, horizon - trip))
        })
        .fold(0, Ships::saturating_add);
    own.saturating_add(helpers)
}
