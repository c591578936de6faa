//! Condition leaves. Each one reads the snapshot and the blackboard and never writes either.

use pw_core::{BbKey, Blackboard, Owner, Planet, PlanetId, Ships, Snapshot};
use pw_forecast::{
    capture_turn, forecast_owner, forecast_ship_count, free_ships_after, nearest_planets,
    total_strength,
};

use crate::config::StealConfig;
use crate::keys;

/// Resolve a planet id stored under `key` against the current snapshot.
pub(crate) fn planet_at<'a, S: Snapshot>(
    state: &'a S,
    bb: &Blackboard,
    key: BbKey,
) -> Option<&'a Planet> {
    bb.planet(key).and_then(|id| state.planet(id))
}

/// Ships already ordered off `source` this turn, as recorded under `COMMITTED`.
pub fn committed_from(bb: &Blackboard, source: PlanetId) -> Ships {
    bb.list(keys::COMMITTED)
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.as_order())
        .filter(|o| o.source == source)
        .map(|o| o.ships)
        .fold(0, Ships::saturating_add)
}

/// `fraction` of the free ships `planet` still has once this turn's commitments leave.
pub fn spendable_ships<S: Snapshot>(
    state: &S,
    bb: &Blackboard,
    planet: &Planet,
    fraction: f64,
) -> Ships {
    free_ships_after(state, planet, committed_from(bb, planet.id), fraction)
}

/// We control strictly more ships than the enemy, counting fleets in flight.
pub fn have_largest_fleet<S: Snapshot>(state: &S) -> bool {
    total_strength(state, Owner::Ally) > total_strength(state, Owner::Enemy)
}

pub fn neutral_planet_available<S: Snapshot>(state: &S) -> bool {
    state.planets_owned_by(Owner::Neutral).next().is_some()
}

pub fn owns_at_least<S: Snapshot>(state: &S, count: usize) -> bool {
    state.planets_owned_by(Owner::Ally).take(count).count() >= count
}

/// Our strongest planet holds at least `min_ships`.
pub fn strongest_planet_holds<S: Snapshot>(state: &S, min_ships: i64) -> bool {
    state
        .planets_owned_by(Owner::Ally)
        .map(|p| p.ships)
        .max()
        .is_some_and(|ships| ships >= min_ships)
}

/// Fleets already in flight will hand us the capture target anyway.
pub fn will_be_captured_by_us<S: Snapshot>(state: &S, bb: &Blackboard) -> bool {
    planet_at(state, bb, keys::CAPTURE_TARGET)
        .is_some_and(|target| forecast_owner(state, target) == Owner::Ally)
}

/// The capture target, as forecast for our nearest planet's arrival, is weaker than everything
/// we could muster with `fraction` of our free ships.
pub fn weaker_than_our_strength<S: Snapshot>(state: &S, bb: &Blackboard, fraction: f64) -> bool {
    let Some(target) = planet_at(state, bb, keys::CAPTURE_TARGET) else {
        return false;
    };
    let allies = nearest_planets(state, target.id, None, Some(Owner::Ally));
    let Some(nearest) = allies.first() else {
        return false;
    };
    let arrival = state.distance(nearest.id, target.id);
    let strength: i64 = allies
        .iter()
        .map(|p| spendable_ships(state, bb, p, fraction))
        .sum();
    forecast_ship_count(state, target, arrival) < strength
}

/// The muster source under consideration can spare at least one ship.
pub fn muster_source_has_free_ships<S: Snapshot>(
    state: &S,
    bb: &Blackboard,
    fraction: f64,
) -> bool {
    planet_at(state, bb, keys::MUSTER_SOURCE)
        .is_some_and(|p| spendable_ships(state, bb, p, fraction) > 0)
}

/// The queued attack beats the target's forecast garrison at the latest queued arrival.
pub fn attack_is_sufficient<S: Snapshot>(state: &S, bb: &Blackboard) -> bool {
    let Some(target) = planet_at(state, bb, keys::CAPTURE_TARGET) else {
        return false;
    };
    let strength = bb.int(keys::ATTACK_STRENGTH).unwrap_or(0);
    let arrival = bb.int(keys::ATTACK_ARRIVAL).unwrap_or(0);
    strength > 0 && strength > forecast_ship_count(state, target, arrival)
}

/// Every ship queued for the current attack was accepted by the engine.
pub fn whole_attack_issued(bb: &Blackboard) -> bool {
    bb.int(keys::ATTACK_ISSUED).unwrap_or(0) == bb.int(keys::ATTACK_STRENGTH).unwrap_or(0)
}

/// Whether the neutral planet under `STEAL_TARGET` can be taken from the enemy.
///
/// The enemy has to be on course to capture it. We then commit only if all of these hold:
/// - the enemy garrison `grace_turns` after its capture is at most `max_reinforcement`;
/// - our discounted free ships within `max(capture turn, grace_turns)` beat both the enemy
///   surplus and that garrison;
/// - half of our planets are close enough to arrive before the grace window closes.
pub fn is_planet_stealable<S: Snapshot>(state: &S, bb: &Blackboard, cfg: &StealConfig) -> bool {
    let Some(planet) = planet_at(state, bb, keys::STEAL_TARGET) else {
        return false;
    };
    let Some((captured_at, Owner::Enemy)) = capture_turn(state, planet) else {
        return false;
    };
    let window = captured_at + cfg.grace_turns;

    let garrison = forecast_ship_count(state, planet, window);
    if garrison > cfg.max_reinforcement {
        tracing::debug!(planet = %planet.id, garrison, "steal target too well reinforced");
        return false;
    }

    let enemy_committed: i64 = state
        .fleets_owned_by(Owner::Enemy)
        .filter(|f| f.destination == planet.id)
        .map(|f| f.ships)
        .sum();
    let enemy_surplus = enemy_committed - planet.ships;

    let reach = captured_at.max(cfg.grace_turns);
    let stealing_force: i64 = nearest_planets(state, planet.id, Some(reach), Some(Owner::Ally))
        .iter()
        .map(|p| spendable_ships(state, bb, p, cfg.fraction))
        .sum();
    if stealing_force <= enemy_surplus || stealing_force <= garrison {
        return false;
    }

    let all_allies = nearest_planets(state, planet.id, None, Some(Owner::Ally));
    match all_allies.get(all_allies.len() / 2) {
        Some(median) => state.distance(median.id, planet.id) <= window,
        None => false,
    }
}
