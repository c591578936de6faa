//! Sub-trees and the default root.

use pw_bt::Node;
use pw_core::{Blackboard, Snapshot, Value};

use crate::behaviors;
use crate::checks;
use crate::config::{DefenseConfig, OffenseConfig, SpreadConfig, StealConfig, StrategyConfig};
use crate::keys;

fn repeat_until_failure<S>(child: Node<S>, cap: Option<usize>) -> Node<S> {
    match cap {
        Some(cap) => Node::until_failure_capped(child, cap),
        None => Node::until_failure(child),
    }
}

/// Submit the order under `ORDER`, recording it under `COMMITTED` once accepted.
fn issue_order<S>(label: &'static str) -> Node<S>
where
    S: Snapshot + 'static,
{
    Node::sequence(vec![
        Node::action(label, |_: &S, bb: &Blackboard| behaviors::issue_queued_order(bb)),
        Node::push(keys::COMMITTED, keys::ORDER),
    ])
}

/// Default root: defend first, then try to steal, attack or spread, in that order.
///
/// ```text
/// Sequence
/// | SetVariable: committed
/// | Succeeder
/// | | Defense
/// | Succeeder
/// | | Selector [Steal, Offense, Spread]
/// ```
pub fn build_tree<S>(config: &StrategyConfig) -> Node<S>
where
    S: Snapshot + 'static,
{
    Node::sequence(vec![
        Node::set_variable(keys::COMMITTED, |_: &S, _: &Blackboard| Value::List(Vec::new())),
        Node::succeeder(defense(&config.defense)),
        Node::succeeder(
            Node::selector(vec![
                steal(&config.steal, &config.offense, config.loop_cap),
                offense(&config.offense, config.loop_cap),
                spread(&config.spread),
            ])
            .named("Strategies"),
        ),
    ])
    .named("Root")
}

pub fn defense<S>(cfg: &DefenseConfig) -> Node<S>
where
    S: Snapshot + 'static,
{
    let cfg = *cfg;
    Node::sequence(vec![
        Node::check("owns enough planets", move |state: &S, _: &Blackboard| {
            checks::owns_at_least(state, cfg.min_owned_planets)
        }),
        Node::set_variable(keys::ORDER, move |state: &S, bb: &Blackboard| {
            behaviors::defend_attacked_planets(state, bb, &cfg)
        }),
        issue_order("defend attacked planets"),
    ])
    .named("Defense")
}

pub fn spread<S>(cfg: &SpreadConfig) -> Node<S>
where
    S: Snapshot + 'static,
{
    let cfg = *cfg;
    Node::sequence(vec![
        Node::check("neutral planet available", |state: &S, _: &Blackboard| {
            checks::neutral_planet_available(state)
        }),
        Node::set_variable(keys::ORDER, move |state: &S, bb: &Blackboard| {
            behaviors::spread_to_weakest_neutral(state, bb, &cfg)
        }),
        issue_order("spread to weakest neutral"),
    ])
    .named("Spread")
}

/// Pick the weakest enemy planet and muster against it.
pub fn offense<S>(cfg: &OffenseConfig, loop_cap: Option<usize>) -> Node<S>
where
    S: Snapshot + 'static,
{
    let min_source = cfg.min_source_ships;
    let mut children = Vec::new();
    if cfg.require_largest_fleet {
        children.push(Node::check("have largest fleet", |state: &S, _: &Blackboard| {
            checks::have_largest_fleet(state)
        }));
    }
    children.push(Node::check(
        "strongest planet holds enough ships",
        move |state: &S, _: &Blackboard| checks::strongest_planet_holds(state, min_source),
    ));
    children.push(Node::set_variable(
        keys::CAPTURE_TARGET,
        |state: &S, _: &Blackboard| behaviors::weakest_enemy_planet(state),
    ));
    children.push(muster_and_capture(cfg.muster_fraction, loop_cap));
    Node::sequence(children).named("Offense")
}

/// Capture the planet stored under `CAPTURE_TARGET` with ships mustered from our nearest planets.
///
/// Sources are popped nearest first. The loop stops as soon as the queued ships beat the target's
/// forecast at the latest queued arrival, or when the candidates run out; sources without free
/// ships are skipped. Queued orders are only issued if the final attack is strong enough, and the
/// sub-tree fails if the engine turns any of them down.
pub fn muster_and_capture<S>(fraction: f64, loop_cap: Option<usize>) -> Node<S>
where
    S: Snapshot + 'static,
{
    let gather = Node::sequence(vec![
        Node::inverter(Node::check("attack is sufficient", |state: &S, bb: &Blackboard| {
            checks::attack_is_sufficient(state, bb)
        })),
        Node::pop(keys::MUSTER_CANDIDATES, keys::MUSTER_SOURCE),
        Node::selector(vec![
            Node::inverter(Node::check(
                "source has free ships",
                move |state: &S, bb: &Blackboard| {
                    checks::muster_source_has_free_ships(state, bb, fraction)
                },
            )),
            Node::sequence(vec![
                Node::set_variable(keys::ORDER, move |state: &S, bb: &Blackboard| {
                    behaviors::muster_order(state, bb, fraction)
                }),
                Node::set_variable(keys::ATTACK_STRENGTH, |_: &S, bb: &Blackboard| {
                    behaviors::accumulated_strength(bb)
                }),
                Node::set_variable(keys::ATTACK_ARRIVAL, |_: &S, bb: &Blackboard| {
                    behaviors::latest_arrival(bb)
                }),
                Node::push(keys::ORDERS, keys::ORDER),
            ])
            .named("Queue Order"),
        ]),
    ])
    .named("Gather");

    let issue = Node::sequence(vec![
        Node::pop(keys::ORDERS, keys::ORDER),
        issue_order("issue queued order"),
        Node::set_variable(keys::ATTACK_ISSUED, |_: &S, bb: &Blackboard| {
            behaviors::issued_strength(bb)
        }),
    ])
    .named("Issue Order");

    Node::sequence(vec![
        Node::inverter(Node::is_absent(keys::CAPTURE_TARGET)),
        Node::inverter(Node::check(
            "will be captured by us",
            |state: &S, bb: &Blackboard| checks::will_be_captured_by_us(state, bb),
        )),
        Node::check(
            "weaker than our strength",
            move |state: &S, bb: &Blackboard| checks::weaker_than_our_strength(state, bb, fraction),
        ),
        Node::set_variable(keys::MUSTER_CANDIDATES, |state: &S, bb: &Blackboard| {
            behaviors::muster_candidates(state, bb)
        }),
        Node::set_variable(keys::ATTACK_STRENGTH, |_: &S, _: &Blackboard| 0i64),
        Node::set_variable(keys::ATTACK_ARRIVAL, |_: &S, _: &Blackboard| 0i64),
        Node::set_variable(keys::ATTACK_ISSUED, |_: &S, _: &Blackboard| 0i64),
        Node::set_variable(keys::ORDER, |_: &S, _: &Blackboard| Value::Absent),
        Node::set_variable(keys::ORDERS, |_: &S, _: &Blackboard| Value::List(Vec::new())),
        Node::succeeder(repeat_until_failure(gather, loop_cap)),
        Node::check("attack is sufficient", |state: &S, bb: &Blackboard| {
            checks::attack_is_sufficient(state, bb)
        }),
        Node::succeeder(repeat_until_failure(issue, loop_cap)),
        Node::check("whole attack issued", |_: &S, bb: &Blackboard| {
            checks::whole_attack_issued(bb)
        }),
    ])
    .named("Muster And Capture")
}

/// Walk the neutral planets under enemy attack and steal the first one that qualifies.
///
/// Succeeds only if a steal was committed this turn.
pub fn steal<S>(cfg: &StealConfig, offense: &OffenseConfig, loop_cap: Option<usize>) -> Node<S>
where
    S: Snapshot + 'static,
{
    let cfg = *cfg;
    let attempt = Node::sequence(vec![
        Node::check("planet is stealable", move |state: &S, bb: &Blackboard| {
            checks::is_planet_stealable(state, bb, &cfg)
        }),
        Node::set_variable(keys::CAPTURE_TARGET, |_: &S, bb: &Blackboard| {
            bb.planet(keys::STEAL_TARGET)
        }),
        muster_and_capture(offense.muster_fraction, loop_cap),
        Node::set_variable(keys::STEAL_COMMITTED, |_: &S, _: &Blackboard| 1i64),
    ])
    .named("Attempt Steal");

    Node::sequence(vec![
        Node::set_variable(keys::STEAL_COMMITTED, |_: &S, _: &Blackboard| 0i64),
        Node::set_variable(keys::STEAL_CANDIDATES, |state: &S, _: &Blackboard| {
            behaviors::attacked_neutral_planets(state)
        }),
        // The inverted attempt ends the loop on the first successful steal.
        Node::succeeder(repeat_until_failure(
            Node::sequence(vec![
                Node::pop(keys::STEAL_CANDIDATES, keys::STEAL_TARGET),
                Node::inverter(attempt),
            ]),
            loop_cap,
        )),
        Node::check("steal committed", |_: &S, bb: &Blackboard| {
            bb.int(keys::STEAL_COMMITTED) == Some(1)
        }),
    ])
    .named("Steal")
}
