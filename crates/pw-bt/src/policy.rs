use pw_core::{Blackboard, OrderSink, Snapshot, TurnContext};

use crate::nodes::Node;

/// Owns a tree and the blackboard it reads and writes.
///
/// The blackboard lives as long as the policy. It is never cleared implicitly, so values written
/// on one turn are visible on the next; call [`TreePolicy::reset_blackboard`] to start from a
/// clean slate.
pub struct TreePolicy<S> {
    root: Node<S>,
    blackboard: Blackboard,
    last: Option<bool>,
}

impl<S> TreePolicy<S>
where
    S: Snapshot,
{
    pub fn new(root: Node<S>) -> Self {
        Self {
            root,
            blackboard: Blackboard::new(),
            last: None,
        }
    }

    /// Evaluate the root once against `state`.
    ///
    /// Node-local state carries over to the next evaluation: a `RepeatN` that has used up its
    /// count stays spent until [`TreePolicy::reset_nodes`].
    pub fn evaluate_turn(
        &mut self,
        ctx: &TurnContext,
        state: &S,
        orders: &mut dyn OrderSink,
    ) -> bool {
        let span = tracing::debug_span!("turn", turn = ctx.turn);
        let _guard = span.enter();

        let outcome = self
            .root
            .evaluate(ctx, state, &mut self.blackboard, orders);
        self.last = Some(outcome);

        tracing::debug!(outcome, "tree evaluated");
        outcome
    }

    /// Outcome of the most recent evaluation, `None` before the first one.
    pub fn last_outcome(&self) -> Option<bool> {
        self.last
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn reset_blackboard(&mut self) {
        self.blackboard.clear();
    }

    /// Clear node-local state (repeat counters) without touching the blackboard.
    pub fn reset_nodes(&mut self) {
        self.root.reset();
    }
}
