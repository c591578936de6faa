use proptest::prelude::*;
use pw_core::{Fleet, GameState, Owner, Planet, PlanetId, Snapshot};

fn owner_strategy() -> impl Strategy<Value = Owner> {
    prop_oneof![Just(Owner::Neutral), Just(Owner::Ally), Just(Owner::Enemy)]
}

fn planets_strategy() -> impl Strategy<Value = Vec<Planet>> {
    prop::collection::vec((owner_strategy(), 0i64..200, -50.0f64..50.0, -50.0f64..50.0), 1..12)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (owner, ships, x, y))| Planet::new(i as u32, owner, ships, 2).at(x, y))
                .collect()
        })
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_zero_on_the_diagonal(planets in planets_strategy()) {
        let n = planets.len() as u32;
        let state = GameState::new(planets, Vec::new());
        for a in 0..n {
            prop_assert_eq!(state.distance(PlanetId(a), PlanetId(a)), 0);
            for b in 0..n {
                prop_assert_eq!(
                    state.distance(PlanetId(a), PlanetId(b)),
                    state.distance(PlanetId(b), PlanetId(a))
                );
            }
        }
    }
}

#[test]
fn owner_filters_keep_snapshot_order() {
    let state = GameState::new(
        vec![
            Planet::new(0, Owner::Ally, 5, 1),
            Planet::new(1, Owner::Enemy, 5, 1),
            Planet::new(2, Owner::Ally, 5, 1),
        ],
        vec![
            Fleet::new(0, Owner::Enemy, 3, PlanetId(1), PlanetId(0), 2),
            Fleet::new(1, Owner::Ally, 4, PlanetId(2), PlanetId(1), 5),
        ],
    );

    let ally: Vec<_> = state.planets_owned_by(Owner::Ally).map(|p| p.id).collect();
    assert_eq!(ally, vec![PlanetId(0), PlanetId(2)]);

    let enemy_fleets: Vec<_> = state.fleets_owned_by(Owner::Enemy).map(|f| f.ships).collect();
    assert_eq!(enemy_fleets, vec![3]);

    assert_eq!(state.planet(PlanetId(1)).map(|p| p.owner), Some(Owner::Enemy));
    assert!(state.planet(PlanetId(9)).is_none());
}
