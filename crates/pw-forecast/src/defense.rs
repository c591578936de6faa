use pw_core::{Fleet, Planet, PlanetId, Ships, Snapshot};

use crate::fleets::{attacking_fleets, defending_fleets, has_sent_fleet};
use crate::rank::nearest_planets;
use crate::simulate::forecast_ship_count;

/// How many ships a threatened planet needs, and who should send them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefensePriority {
    pub priority: Ships,
    pub defender: Option<PlanetId>,
}

impl DefensePriority {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Score the threat `attacker` poses to `planet` and pick the nearest planet able to answer it.
///
/// `priority = attacker.ships - forecast(planet, attacker arrival) - ships already defending`.
/// Candidate defenders are planets of the same owner, nearest first; a candidate that already has a
/// fleet en route to `planet` is skipped, and the first one holding at least `priority` ships wins.
///
/// Returns [`DefensePriority::none`] when nothing attacks the planet, when it is already safe
/// (negative priority) or when no candidate qualifies.
pub fn defense_priority<S: Snapshot>(
    state: &S,
    planet: &Planet,
    attacker: &Fleet,
) -> DefensePriority {
    if attacking_fleets(state, planet).is_empty() {
        return DefensePriority::none();
    }

    let reinforcements = defending_fleets(state, planet)
        .iter()
        .map(|f| f.ships)
        .fold(0, Ships::saturating_add);
    let priority = attacker
        .ships
        .saturating_sub(forecast_ship_count(state, planet, attacker.turns_remaining))
        .saturating_sub(reinforcements);
    if priority < 0 {
        tracing::trace!(planet = %planet.id, priority, "planet already holds");
        return DefensePriority::none();
    }

    let defender = nearest_planets(state, planet.id, None, Some(planet.owner))
        .into_iter()
        .filter(|candidate| !has_sent_fleet(state, candidate.id, planet.id))
        .find(|candidate| candidate.ships >= priority);

    match defender {
        Some(defender) => DefensePriority {
            priority,
            defender: Some(defender.id),
        },
        None => {
            tracing::trace!(planet = %planet.id, priority, "no planet can defend");
            DefensePriority::none()
        }
    }
}
