use pw_core::{Owner, Planet, PlanetId, Ships, Snapshot, Turns};

/// Planets of `owner` holding at most `cutoff` ships, weakest first.
///
/// With `relative_to`, that planet is left out and the rest are ordered by `2 * distance + ships`,
/// which favours planets that are both close and weak. The sort is stable, so ties keep snapshot
/// order.
pub fn rank_by_strength<S: Snapshot>(
    state: &S,
    owner: Owner,
    relative_to: Option<PlanetId>,
    cutoff: Option<Ships>,
) -> Vec<&Planet> {
    let mut planets: Vec<&Planet> = state
        .planets_owned_by(owner)
        .filter(|p| Some(p.id) != relative_to)
        .filter(|p| cutoff.map_or(true, |max| p.ships <= max))
        .collect();
    match relative_to {
        Some(origin) => planets.sort_by_key(|p| {
            state
                .distance(origin, p.id)
                .saturating_mul(2)
                .saturating_add(p.ships)
        }),
        None => planets.sort_by_key(|p| p.ships),
    }
    planets
}

/// Exact reverse of [`rank_by_strength`], ties included.
pub fn rank_by_strength_desc<S: Snapshot>(
    state: &S,
    owner: Owner,
    relative_to: Option<PlanetId>,
    cutoff: Option<Ships>,
) -> Vec<&Planet> {
    let mut planets = rank_by_strength(state, owner, relative_to, cutoff);
    planets.reverse();
    planets
}

/// Planets other than `origin` reachable within `max_turns`, nearest first.
///
/// `owner` restricts the result to one side; `None` keeps every planet.
pub fn nearest_planets<S: Snapshot>(
    state: &S,
    origin: PlanetId,
    max_turns: Option<Turns>,
    owner: Option<Owner>,
) -> Vec<&Planet> {
    let mut planets: Vec<(Turns, &Planet)> = state
        .planets()
        .iter()
        .filter(|p| p.id != origin)
        .filter(|p| owner.map_or(true, |o| p.owner == o))
        .map(|p| (state.distance(origin, p.id), p))
        .filter(|&(d, _)| max_turns.map_or(true, |max| d <= max))
        .collect();
    planets.sort_by_key(|&(d, _)| d);
    planets.into_iter().map(|(_, p)| p).collect()
}

/// Ships `owner` controls: garrisons plus fleets in flight.
pub fn total_strength<S: Snapshot>(state: &S, owner: Owner) -> Ships {
    let garrisons = state
        .planets_owned_by(owner)
        .map(|p| p.ships)
        .fold(0, Ships::saturating_add);
    let in_flight = state
        .fleets_owned_by(owner)
        .map(|f| f.ships)
        .fold(0, Ships::saturating_add);
    garrisons.saturating_add(in_flight)
}

/// Growth per defending ship, scaled so that an empty planet scores its raw growth rate.
pub fn production_factor(planet: &Planet) -> f64 {
    planet.growth as f64 / (planet.ships as f64 / 10.0 + 1.0)
}
