//! Action leaves and the values computed by `SetVariable` nodes.
//!
//! Actions return the order they want sent; the engine drops empty orders and submits the rest.

use pw_core::{Blackboard, Order, Owner, PlanetId, Snapshot, Value};
use pw_forecast::{
    attacked_planets, attacking_fleets, defense_priority, forecast_owner, nearest_planets,
    rank_by_strength, soonest_attacker,
};

use crate::checks::{planet_at, spendable_ships};
use crate::config::{DefenseConfig, SpreadConfig};
use crate::keys;

/// Reinforce the allied planet in the most danger.
///
/// Every allied planet under enemy attack is scored with [`defense_priority`] against its soonest
/// attacker. The highest priority with a valid defender wins (the first one on ties) and the
/// defender sends `send_fraction` of its free ships.
pub fn defend_attacked_planets<S: Snapshot>(
    state: &S,
    bb: &Blackboard,
    cfg: &DefenseConfig,
) -> Option<Order> {
    let mut best: Option<(i64, PlanetId, PlanetId)> = None;
    for planet in attacked_planets(state, Owner::Enemy) {
        if planet.owner != Owner::Ally {
            continue;
        }
        let Some(attacker) = soonest_attacker(state, planet) else {
            continue;
        };
        let threat = defense_priority(state, planet, attacker);
        let Some(defender) = threat.defender else {
            continue;
        };
        if best.map_or(true, |(priority, _, _)| threat.priority > priority) {
            best = Some((threat.priority, planet.id, defender));
        }
    }

    let (priority, endangered, defender) = best?;
    let ships = spendable_ships(state, bb, state.planet(defender)?, cfg.send_fraction);
    tracing::info!(%endangered, %defender, priority, ships, "defending");
    Some(Order::between(state, defender, endangered, ships))
}

/// Send part of our strongest safe planet to the closest, weakest neutral planet in range.
///
/// Planets with incoming attackers are never used as the source, and neutral planets that fleets
/// in flight will already hand to us are skipped.
pub fn spread_to_weakest_neutral<S: Snapshot>(
    state: &S,
    bb: &Blackboard,
    cfg: &SpreadConfig,
) -> Option<Order> {
    let source = state
        .planets_owned_by(Owner::Ally)
        .filter(|p| attacking_fleets(state, p).is_empty())
        .max_by_key(|p| p.ships)?;
    if source.ships < cfg.min_source_ships {
        tracing::debug!(source = %source.id, ships = source.ships, "spread source too weak");
        return None;
    }

    let in_range: Vec<PlanetId> =
        nearest_planets(state, source.id, Some(cfg.max_range), Some(Owner::Neutral))
            .iter()
            .map(|p| p.id)
            .collect();
    let target = rank_by_strength(state, Owner::Neutral, Some(source.id), None)
        .into_iter()
        .filter(|p| in_range.contains(&p.id))
        .find(|p| forecast_owner(state, p) != Owner::Ally)?;

    let ships = spendable_ships(state, bb, source, cfg.send_fraction);
    tracing::info!(source = %source.id, target = %target.id, ships, "spreading");
    Some(Order::between(state, source.id, target.id, ships))
}

/// Weakest enemy planet, or absent when the enemy holds none.
pub fn weakest_enemy_planet<S: Snapshot>(state: &S) -> Value {
    rank_by_strength(state, Owner::Enemy, None, None)
        .first()
        .map(|p| p.id)
        .into()
}

/// Allied planets ordered so that the one nearest the capture target is popped first.
pub fn muster_candidates<S: Snapshot>(state: &S, bb: &Blackboard) -> Value {
    let Some(target) = bb.planet(keys::CAPTURE_TARGET) else {
        return Value::Absent;
    };
    nearest_planets(state, target, None, Some(Owner::Ally))
        .iter()
        .rev()
        .map(|p| p.id)
        .collect()
}

/// Order moving `fraction` of the muster source's free ships to the capture target.
pub fn muster_order<S: Snapshot>(state: &S, bb: &Blackboard, fraction: f64) -> Option<Order> {
    let source = planet_at(state, bb, keys::MUSTER_SOURCE)?;
    let target = bb.planet(keys::CAPTURE_TARGET)?;
    let ships = spendable_ships(state, bb, source, fraction);
    Some(Order::between(state, source.id, target, ships))
}

/// Running total of the ships queued for the current attack.
pub fn accumulated_strength(bb: &Blackboard) -> i64 {
    let queued = bb.order(keys::ORDER).map_or(0, |o| o.ships);
    bb.int(keys::ATTACK_STRENGTH).unwrap_or(0) + queued
}

/// Latest arrival among the orders queued for the current attack.
pub fn latest_arrival(bb: &Blackboard) -> i64 {
    let queued = bb.order(keys::ORDER).map_or(0, |o| o.arrival_turns);
    bb.int(keys::ATTACK_ARRIVAL).unwrap_or(0).max(queued)
}

/// Ships of the current attack accepted so far, counting the order just issued.
pub fn issued_strength(bb: &Blackboard) -> i64 {
    let issued = bb.order(keys::ORDER).map_or(0, |o| o.ships);
    bb.int(keys::ATTACK_ISSUED).unwrap_or(0) + issued
}

/// Neutral planets the enemy is attacking, ordered so that snapshot order pops first.
pub fn attacked_neutral_planets<S: Snapshot>(state: &S) -> Value {
    attacked_planets(state, Owner::Enemy)
        .iter()
        .rev()
        .filter(|p| p.owner.is_neutral())
        .map(|p| p.id)
        .collect()
}

/// Hand the order stored under `ORDER` to the engine.
pub fn issue_queued_order(bb: &Blackboard) -> Option<Order> {
    let order = bb.order(keys::ORDER)?;
    tracing::debug!(
        source = %order.source,
        destination = %order.destination,
        ships = order.ships,
        "issuing order"
    );
    Some(order)
}
