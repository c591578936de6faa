use std::cmp::Reverse;

use proptest::prelude::*;
use pw_core::{Fleet, GameState, Owner, Planet, PlanetId, Snapshot};
use pw_forecast::{
    forecast_at, forecast_owner, forecast_ship_count, free_ships, rank_by_strength,
    rank_by_strength_desc, ships_pinned,
};

fn owner_strategy() -> impl Strategy<Value = Owner> {
    prop_oneof![Just(Owner::Neutral), Just(Owner::Ally), Just(Owner::Enemy)]
}

fn side_strategy() -> impl Strategy<Value = Owner> {
    prop_oneof![Just(Owner::Ally), Just(Owner::Enemy)]
}

/// Small ship ranges so that rankings see plenty of ties.
fn state_strategy() -> impl Strategy<Value = GameState> {
    let planets = prop::collection::vec(
        (owner_strategy(), 0i64..12, 0i64..5, 0.0f64..30.0, 0.0f64..30.0),
        2..10,
    );
    planets.prop_flat_map(|rows| {
        let n = rows.len() as u32;
        let fleets = prop::collection::vec(
            (side_strategy(), 1i64..40, 0..n, 0..n, 0i64..15),
            0..12,
        );
        (Just(rows), fleets)
    })
    .prop_map(|(rows, fleet_rows)| {
        let planets = rows
            .into_iter()
            .enumerate()
            .map(|(i, (owner, ships, growth, x, y))| {
                Planet::new(i as u32, owner, ships, growth).at(x, y)
            })
            .collect();
        let fleets = fleet_rows
            .into_iter()
            .enumerate()
            .map(|(i, (owner, ships, src, dst, turns))| {
                Fleet::new(i as u32, owner, ships, PlanetId(src), PlanetId(dst), turns)
            })
            .collect();
        GameState::new(planets, fleets)
    })
}

proptest! {
    #[test]
    fn zero_horizon_is_the_current_garrison(state in state_strategy()) {
        for planet in state.planets() {
            prop_assert_eq!(forecast_ship_count(&state, planet, 0), planet.ships);
        }
    }

    #[test]
    fn free_and_pinned_ships_add_up(state in state_strategy()) {
        for planet in state.planets() {
            prop_assert_eq!(
                free_ships(&state, planet, 1.0) + ships_pinned(&state, planet),
                planet.ships
            );
        }
    }

    #[test]
    fn rankings_order_ties_by_snapshot_position(
        state in state_strategy(),
        owner in owner_strategy(),
        relative in prop::option::of(0u32..2),
        cutoff in prop::option::of(0i64..12),
    ) {
        let relative_to = relative.map(PlanetId);
        let mut scored: Vec<(i64, usize, PlanetId)> = state
            .planets()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.owner == owner && Some(p.id) != relative_to)
            .filter(|(_, p)| cutoff.map_or(true, |max| p.ships <= max))
            .map(|(index, p)| {
                let score = match relative_to {
                    Some(origin) => 2 * state.distance(origin, p.id) + p.ships,
                    None => p.ships,
                };
                (score, index, p.id)
            })
            .collect();

        scored.sort_by_key(|&(score, index, _)| (score, index));
        let expected_ascending: Vec<PlanetId> = scored.iter().map(|&(_, _, id)| id).collect();
        scored.sort_by_key(|&(score, index, _)| Reverse((score, index)));
        let expected_descending: Vec<PlanetId> = scored.iter().map(|&(_, _, id)| id).collect();

        let ascending: Vec<PlanetId> = rank_by_strength(&state, owner, relative_to, cutoff)
            .iter()
            .map(|p| p.id)
            .collect();
        let descending: Vec<PlanetId> = rank_by_strength_desc(&state, owner, relative_to, cutoff)
            .iter()
            .map(|p| p.id)
            .collect();
        prop_assert_eq!(ascending, expected_ascending);
        prop_assert_eq!(descending, expected_descending);
    }

    #[test]
    fn forecasts_never_go_negative(state in state_strategy(), horizon in 0i64..20) {
        for planet in state.planets() {
            prop_assert!(forecast_at(&state, planet, horizon).ships >= 0);
            prop_assert!(forecast_ship_count(&state, planet, horizon) >= 0);
        }
    }

    #[test]
    fn long_horizons_agree_with_the_final_owner(state in state_strategy()) {
        for planet in state.planets() {
            prop_assert_eq!(forecast_at(&state, planet, 20).owner, forecast_owner(&state, planet));
        }
    }
}
