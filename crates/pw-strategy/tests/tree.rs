use pw_bt::TreePolicy;
use pw_core::{
    Fleet, GameState, Order, Owner, Planet, PlanetId, RecordingSink, Snapshot, TurnContext,
};
use pw_strategy::keys;
use pw_strategy::topology::defense;
use pw_strategy::{build_tree, DefenseConfig, OffenseConfig, StrategyConfig};

fn evaluate<S: Snapshot + 'static>(state: &S, config: &StrategyConfig) -> Vec<Order> {
    let mut policy = TreePolicy::new(build_tree(config));
    let mut sink = RecordingSink::default();
    policy.evaluate_turn(&TurnContext::default(), state, &mut sink);
    sink.orders
}

/// Neutral N (10 ships) about to fall to a 15-ship enemy fleet; our planet A sits two turns away.
fn contested_neutral() -> GameState {
    GameState::new(
        vec![
            Planet::new(0, Owner::Neutral, 10, 3),
            Planet::new(1, Owner::Ally, 40, 2),
            Planet::new(2, Owner::Enemy, 60, 2),
        ],
        vec![Fleet::new(0, Owner::Enemy, 15, PlanetId(2), PlanetId(0), 4)],
    )
    .with_distance(PlanetId(0), PlanetId(1), 2)
    .with_distance(PlanetId(0), PlanetId(2), 4)
    .with_distance(PlanetId(1), PlanetId(2), 6)
}

#[test]
fn steal_beats_the_enemy_to_a_neutral_planet() {
    let orders = evaluate(&contested_neutral(), &StrategyConfig::default());
    assert_eq!(
        orders,
        vec![Order {
            source: PlanetId(1),
            destination: PlanetId(0),
            ships: 26,
            arrival_turns: 2,
        }]
    );
}

#[test]
fn steal_commits_only_once_per_turn() {
    let mut policy = TreePolicy::new(build_tree(&StrategyConfig::default()));
    let state = contested_neutral();
    let mut sink = RecordingSink::default();

    assert!(policy.evaluate_turn(&TurnContext::default(), &state, &mut sink));
    assert_eq!(policy.blackboard().int(keys::STEAL_COMMITTED), Some(1));
    assert_eq!(policy.blackboard().stack_len(keys::ORDERS), 0);
}

#[test]
fn defense_reinforces_the_planet_in_danger() {
    let state = GameState::new(
        vec![
            Planet::new(0, Owner::Ally, 10, 1),
            Planet::new(1, Owner::Ally, 8, 1),
            Planet::new(2, Owner::Ally, 60, 1),
            Planet::new(3, Owner::Enemy, 80, 1),
        ],
        vec![Fleet::new(0, Owner::Enemy, 30, PlanetId(3), PlanetId(0), 4)],
    )
    .with_distance(PlanetId(0), PlanetId(1), 2)
    .with_distance(PlanetId(0), PlanetId(2), 5)
    .with_distance(PlanetId(0), PlanetId(3), 6);

    let mut policy = TreePolicy::new(defense(&DefenseConfig::default()));
    let mut sink = RecordingSink::default();
    assert!(policy.evaluate_turn(&TurnContext::default(), &state, &mut sink));
    assert_eq!(
        sink.orders,
        vec![Order {
            source: PlanetId(2),
            destination: PlanetId(0),
            ships: 15,
            arrival_turns: 5,
        }]
    );
}

#[test]
fn defense_needs_enough_planets() {
    let state = GameState::new(
        vec![
            Planet::new(0, Owner::Ally, 10, 1),
            Planet::new(1, Owner::Enemy, 80, 1),
        ],
        vec![Fleet::new(0, Owner::Enemy, 30, PlanetId(1), PlanetId(0), 4)],
    );
    let mut policy = TreePolicy::new(defense(&DefenseConfig::default()));
    let mut sink = RecordingSink::default();

    assert!(!policy.evaluate_turn(&TurnContext::default(), &state, &mut sink));
    assert!(sink.orders.is_empty());
}

#[test]
fn offense_musters_only_what_defense_left_behind() {
    // P2 defends P0 first, then is the nearest muster source against the weak enemy P4.
    let state = GameState::new(
        vec![
            Planet::new(0, Owner::Ally, 10, 1).at(0.0, 0.0),
            Planet::new(1, Owner::Ally, 8, 1).at(2.0, 0.0),
            Planet::new(2, Owner::Ally, 60, 1).at(5.0, 0.0),
            Planet::new(3, Owner::Enemy, 80, 1).at(-6.0, 0.0),
            Planet::new(4, Owner::Enemy, 20, 1).at(9.0, 0.0),
        ],
        vec![Fleet::new(0, Owner::Enemy, 30, PlanetId(3), PlanetId(0), 4)],
    );
    let config = StrategyConfig {
        offense: OffenseConfig {
            muster_fraction: 1.0,
            ..OffenseConfig::default()
        },
        ..StrategyConfig::default()
    };

    let orders = evaluate(&state, &config);
    assert_eq!(
        orders,
        vec![
            Order {
                source: PlanetId(2),
                destination: PlanetId(0),
                ships: 15,
                arrival_turns: 5,
            },
            Order {
                source: PlanetId(2),
                destination: PlanetId(4),
                ships: 45,
                arrival_turns: 4,
            },
        ]
    );
    let sent: i64 = orders.iter().map(|o| o.ships).sum();
    assert!(sent <= state.planets()[2].ships);
}

#[test]
fn spread_runs_when_nothing_else_applies() {
    let state = GameState::new(
        vec![
            Planet::new(0, Owner::Ally, 12, 2).at(0.0, 0.0),
            Planet::new(1, Owner::Neutral, 3, 1).at(3.0, 0.0),
            Planet::new(2, Owner::Enemy, 90, 5).at(30.0, 0.0),
        ],
        Vec::new(),
    );
    let orders = evaluate(&state, &StrategyConfig::default());
    assert_eq!(
        orders,
        vec![Order {
            source: PlanetId(0),
            destination: PlanetId(1),
            ships: 3,
            arrival_turns: 3,
        }]
    );
}

#[test]
fn same_snapshot_same_orders() {
    let state = GameState::new(
        vec![
            Planet::new(0, Owner::Ally, 70, 3).at(0.0, 0.0),
            Planet::new(1, Owner::Ally, 35, 2).at(4.0, 1.0),
            Planet::new(2, Owner::Neutral, 12, 2).at(6.0, 6.0),
            Planet::new(3, Owner::Neutral, 20, 4).at(-5.0, 2.0),
            Planet::new(4, Owner::Enemy, 25, 3).at(9.0, -2.0),
            Planet::new(5, Owner::Enemy, 60, 1).at(14.0, 4.0),
        ],
        vec![
            Fleet::new(0, Owner::Enemy, 18, PlanetId(4), PlanetId(2), 3),
            Fleet::new(1, Owner::Enemy, 40, PlanetId(5), PlanetId(1), 6),
        ],
    );
    let config = StrategyConfig::default();

    let mut policy = TreePolicy::new(build_tree(&config));
    let mut first = RecordingSink::default();
    policy.evaluate_turn(&TurnContext::new(12), &state, &mut first);

    policy.reset_blackboard();
    let mut second = RecordingSink::default();
    policy.evaluate_turn(&TurnContext::new(12), &state, &mut second);

    assert!(!first.orders.is_empty());
    assert_eq!(first, second);
    assert_eq!(first.orders, evaluate(&state, &config));
}

#[test]
fn default_tree_renders_its_topology() {
    let tree = build_tree::<GameState>(&StrategyConfig::default());
    let rendered = tree.render_tree();
    let first_lines: Vec<&str> = rendered.lines().take(4).collect();
    assert_eq!(
        first_lines,
        vec![
            "Sequence: Root",
            "| SetVariable: committed",
            "| Succeeder",
            "| | Sequence: Defense"
        ]
    );
    assert!(rendered.contains("Sequence: Steal"));
    assert!(rendered.contains("Sequence: Muster And Capture"));
}
