use std::cell::Cell;
use std::rc::Rc;

use pw_bt::Node;
use pw_core::{Blackboard, GameState, RecordingSink, TurnContext};

const CTX: TurnContext = TurnContext { turn: 0 };

/// Check leaf that succeeds `successes` times in total, then fails forever.
fn countdown(successes: u32, calls: &Rc<Cell<u32>>) -> Node<GameState> {
    let calls = calls.clone();
    Node::check("countdown", move |_, _| {
        calls.set(calls.get() + 1);
        calls.get() <= successes
    })
}

fn run(node: &mut Node<GameState>) -> bool {
    let state = GameState::default();
    let mut bb = Blackboard::new();
    node.evaluate(&CTX, &state, &mut bb, &mut RecordingSink::default())
}

#[test]
fn inverter_negates() {
    assert!(!run(&mut Node::inverter(Node::check("t", |_, _| true))));
    assert!(run(&mut Node::inverter(Node::check("f", |_, _| false))));
}

#[test]
fn succeeder_and_failer_still_run_their_child() {
    let calls = Rc::new(Cell::new(0));
    assert!(run(&mut Node::succeeder(countdown(0, &calls))));
    assert!(!run(&mut Node::failer(countdown(10, &calls))));
    assert_eq!(calls.get(), 2);
}

#[test]
fn until_failure_loops_until_the_child_fails() {
    let calls = Rc::new(Cell::new(0));
    let mut node = Node::until_failure(countdown(4, &calls));

    assert!(!run(&mut node));
    // Four successes plus the failing call that ended the loop.
    assert_eq!(calls.get(), 5);
}

#[test]
fn capped_until_failure_stops_a_runaway_child() {
    let calls = Rc::new(Cell::new(0));
    let mut node = Node::until_failure_capped(countdown(u32::MAX, &calls), 16);

    assert!(!run(&mut node));
    assert_eq!(calls.get(), 16);
}

#[test]
fn cap_does_not_change_a_well_formed_loop() {
    let calls = Rc::new(Cell::new(0));
    let mut node = Node::until_failure_capped(countdown(3, &calls), 100);

    assert!(!run(&mut node));
    assert_eq!(calls.get(), 4);
}

#[test]
fn repeat_n_succeeds_after_n_successes() {
    let calls = Rc::new(Cell::new(0));
    let mut node = Node::repeat(countdown(10, &calls), 3);

    assert!(run(&mut node));
    assert_eq!(calls.get(), 3);
}

#[test]
fn repeat_n_stops_on_first_failure() {
    let calls = Rc::new(Cell::new(0));
    let mut node = Node::repeat(countdown(1, &calls), 5);

    assert!(!run(&mut node));
    assert_eq!(calls.get(), 2);
}

#[test]
fn repeat_n_counter_persists_until_reset() {
    let calls = Rc::new(Cell::new(0));
    let mut node = Node::repeat(countdown(100, &calls), 2);

    assert!(run(&mut node));
    assert_eq!(calls.get(), 2);

    // Budget spent: nothing runs until the counter is reset.
    assert!(run(&mut node));
    assert_eq!(calls.get(), 2);

    node.reset();
    assert!(run(&mut node));
    assert_eq!(calls.get(), 4);
}

#[test]
fn reset_reaches_nested_counters() {
    let calls = Rc::new(Cell::new(0));
    let mut tree = Node::sequence(vec![Node::succeeder(Node::repeat(countdown(100, &calls), 1))]);

    run(&mut tree);
    run(&mut tree);
    assert_eq!(calls.get(), 1);

    tree.reset();
    run(&mut tree);
    assert_eq!(calls.get(), 2);
}
