use pw_core::{Fleet, Owner, Planet, PlanetId, Ships, Snapshot};

/// Fleets heading for `planet` whose owner differs from the planet's.
///
/// Every incoming fleet attacks a neutral planet. Fleets with `turns_remaining == 0` are included:
/// they are resolved on turn 0 of a forecast.
pub fn attacking_fleets<'a, S: Snapshot>(state: &'a S, planet: &Planet) -> Vec<&'a Fleet> {
    state
        .fleets()
        .iter()
        .filter(|f| f.destination == planet.id && f.owner != planet.owner)
        .collect()
}

/// Fleets heading for `planet` that belong to its owner. Always empty for neutral planets.
pub fn defending_fleets<'a, S: Snapshot>(state: &'a S, planet: &Planet) -> Vec<&'a Fleet> {
    if planet.owner.is_neutral() {
        return Vec::new();
    }
    state
        .fleets()
        .iter()
        .filter(|f| f.destination == planet.id && f.owner == planet.owner)
        .collect()
}

/// Garrison ships already spoken for by incoming hostile fleets.
pub fn ships_pinned<S: Snapshot>(state: &S, planet: &Planet) -> Ships {
    let hostile = attacking_fleets(state, planet)
        .iter()
        .map(|f| f.ships)
        .fold(0, Ships::saturating_add);
    planet.ships.min(hostile)
}

/// Ships that can leave `planet` without weakening its answer to incoming attacks.
///
/// `fraction` is clamped to `[0, 1]` and the result truncated toward zero; a NaN fraction frees
/// nothing.
pub fn free_ships<S: Snapshot>(state: &S, planet: &Planet, fraction: f64) -> Ships {
    free_ships_after(state, planet, 0, fraction)
}

/// [`free_ships`] once `committed` ships have already been ordered off `planet` this turn.
pub fn free_ships_after<S: Snapshot>(
    state: &S,
    planet: &Planet,
    committed: Ships,
    fraction: f64,
) -> Ships {
    let available = planet
        .ships
        .saturating_sub(ships_pinned(state, planet))
        .saturating_sub(committed);
    let share = (available as f64 * fraction.clamp(0.0, 1.0)) as Ships;
    share.max(0)
}

/// `true` if the owner of `source` already has a fleet from it en route to `destination`.
pub fn has_sent_fleet<S: Snapshot>(state: &S, source: PlanetId, destination: PlanetId) -> bool {
    let Some(owner) = state.planet(source).map(|p| p.owner) else {
        return false;
    };
    state
        .fleets()
        .iter()
        .any(|f| f.source == source && f.destination == destination && f.owner == owner)
}

/// Planets not owned by `by` that at least one of `by`'s fleets is heading for, in snapshot order.
pub fn attacked_planets<S: Snapshot>(state: &S, by: Owner) -> Vec<&Planet> {
    state
        .planets()
        .iter()
        .filter(|p| p.owner != by)
        .filter(|p| state.fleets_owned_by(by).any(|f| f.destination == p.id))
        .collect()
}

/// Attacking fleet that lands first; the earliest in snapshot order on ties.
pub fn soonest_attacker<'a, S: Snapshot>(state: &'a S, planet: &Planet) -> Option<&'a Fleet> {
    attacking_fleets(state, planet)
        .into_iter()
        .min_by_key(|f| f.turns_remaining)
}
