use std::fmt;

use pw_core::{BbKey, Blackboard, Order, OrderSink, Snapshot, TurnContext, Value};

use crate::bt::{Compute, Effect, Predicate};

/// One node of a behavior tree.
///
/// Control nodes (`Selector`, `Sequence` and the decorators) only route success and failure;
/// leaves read the snapshot, touch the blackboard or submit orders. `true` means success.
///
/// The shape of a tree never changes after construction. The only node-local state is the
/// `RepeatN` counter, cleared by [`Node::reset`].
pub enum Node<S> {
    /// Succeeds on the first child that succeeds; fails only if every child fails.
    Selector {
        name: Option<&'static str>,
        children: Vec<Node<S>>,
    },
    /// Fails on the first child that fails; succeeds only if every child succeeds.
    Sequence {
        name: Option<&'static str>,
        children: Vec<Node<S>>,
    },
    Inverter(Box<Node<S>>),
    /// Runs the child for its side effects and succeeds regardless.
    Succeeder(Box<Node<S>>),
    /// Runs the child for its side effects and fails regardless.
    Failer(Box<Node<S>>),
    /// Re-runs the child until it fails, then fails.
    ///
    /// Without a cap this loops forever on a child that keeps succeeding; pair it with a child
    /// that is guaranteed to run dry, such as a `PopFromStack`.
    RepeatUntilFailure {
        child: Box<Node<S>>,
        cap: Option<usize>,
    },
    /// Runs the child until it has been run `n` times in total, failing on the first child
    /// failure. The count carries over between evaluations until [`Node::reset`].
    RepeatN {
        child: Box<Node<S>>,
        n: usize,
        counter: usize,
    },
    Check {
        label: &'static str,
        predicate: Predicate<S>,
    },
    /// Submits the order its effect produces. Missing and empty orders fail without reaching the
    /// sink.
    Action {
        label: &'static str,
        effect: Effect<S>,
    },
    SetVariable {
        key: BbKey,
        compute: Compute<S>,
    },
    IsVariableAbsent(BbKey),
    /// Pushes the value stored under `item` onto the stack under `stack`.
    PushToStack {
        stack: BbKey,
        item: BbKey,
    },
    /// Pops the stack under `stack` into `item`; fails when the stack is missing or empty.
    PopFromStack {
        stack: BbKey,
        item: BbKey,
    },
}

impl<S> Node<S> {
    pub fn selector(children: Vec<Node<S>>) -> Self {
        Node::Selector {
            name: None,
            children,
        }
    }

    pub fn sequence(children: Vec<Node<S>>) -> Self {
        Node::Sequence {
            name: None,
            children,
        }
    }

    /// Attach a display name to a composite. Other kinds are returned unchanged.
    pub fn named(mut self, new_name: &'static str) -> Self {
        if let Node::Selector { name, .. } | Node::Sequence { name, .. } = &mut self {
            *name = Some(new_name);
        }
        self
    }

    pub fn inverter(child: Node<S>) -> Self {
        Node::Inverter(Box::new(child))
    }

    pub fn succeeder(child: Node<S>) -> Self {
        Node::Succeeder(Box::new(child))
    }

    pub fn failer(child: Node<S>) -> Self {
        Node::Failer(Box::new(child))
    }

    pub fn until_failure(child: Node<S>) -> Self {
        Node::RepeatUntilFailure {
            child: Box::new(child),
            cap: None,
        }
    }

    /// Like [`Node::until_failure`], but gives up (and fails) after `cap` successful iterations.
    pub fn until_failure_capped(child: Node<S>, cap: usize) -> Self {
        Node::RepeatUntilFailure {
            child: Box::new(child),
            cap: Some(cap),
        }
    }

    pub fn repeat(child: Node<S>, n: usize) -> Self {
        Node::RepeatN {
            child: Box::new(child),
            n,
            counter: 0,
        }
    }

    pub fn check(
        label: &'static str,
        predicate: impl Fn(&S, &Blackboard) -> bool + 'static,
    ) -> Self {
        Node::Check {
            label,
            predicate: Box::new(predicate),
        }
    }

    pub fn action(
        label: &'static str,
        effect: impl FnMut(&S, &Blackboard) -> Option<Order> + 'static,
    ) -> Self {
        Node::Action {
            label,
            effect: Box::new(effect),
        }
    }

    pub fn set_variable<V>(key: BbKey, compute: impl Fn(&S, &Blackboard) -> V + 'static) -> Self
    where
        V: Into<Value>,
    {
        Node::SetVariable {
            key,
            compute: Box::new(move |state: &S, bb: &Blackboard| -> Value {
                compute(state, bb).into()
            }),
        }
    }

    pub fn is_absent(key: BbKey) -> Self {
        Node::IsVariableAbsent(key)
    }

    pub fn push(stack: BbKey, item: BbKey) -> Self {
        Node::PushToStack { stack, item }
    }

    pub fn pop(stack: BbKey, item: BbKey) -> Self {
        Node::PopFromStack { stack, item }
    }

    /// Clear node-local state (repeat counters) in the whole subtree.
    pub fn reset(&mut self) {
        match self {
            Node::Selector { children, .. } | Node::Sequence { children, .. } => {
                for child in children.iter_mut() {
                    child.reset();
                }
            }
            Node::Inverter(child)
            | Node::Succeeder(child)
            | Node::Failer(child)
            | Node::RepeatUntilFailure { child, .. } => child.reset(),
            Node::RepeatN { child, counter, .. } => {
                *counter = 0;
                child.reset();
            }
            Node::Check { .. }
            | Node::Action { .. }
            | Node::SetVariable { .. }
            | Node::IsVariableAbsent(_)
            | Node::PushToStack { .. }
            | Node::PopFromStack { .. } => {}
        }
    }

    fn children(&self) -> Vec<&Node<S>> {
        match self {
            Node::Selector { children, .. } | Node::Sequence { children, .. } => {
                children.iter().collect()
            }
            Node::Inverter(child)
            | Node::Succeeder(child)
            | Node::Failer(child)
            | Node::RepeatUntilFailure { child, .. }
            | Node::RepeatN { child, .. } => vec![child.as_ref()],
            _ => Vec::new(),
        }
    }

    /// Indented, one-line-per-node dump of the tree.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"| ".repeat(depth));
        out.push_str(&self.to_string());
        out.push('\n');
        for child in self.children() {
            child.render_into(out, depth + 1);
        }
    }
}

impl<S: Snapshot> Node<S> {
    pub fn evaluate(
        &mut self,
        ctx: &TurnContext,
        state: &S,
        blackboard: &mut Blackboard,
        orders: &mut dyn OrderSink,
    ) -> bool {
        let result = match self {
            Node::Selector { children, .. } => {
                let mut succeeded = false;
                for child in children.iter_mut() {
                    if child.evaluate(ctx, state, blackboard, orders) {
                        succeeded = true;
                        break;
                    }
                }
                succeeded
            }
            Node::Sequence { children, .. } => {
                let mut succeeded = true;
                for child in children.iter_mut() {
                    if !child.evaluate(ctx, state, blackboard, orders) {
                        succeeded = false;
                        break;
                    }
                }
                succeeded
            }
            Node::Inverter(child) => !child.evaluate(ctx, state, blackboard, orders),
            Node::Succeeder(child) => {
                child.evaluate(ctx, state, blackboard, orders);
                true
            }
            Node::Failer(child) => {
                child.evaluate(ctx, state, blackboard, orders);
                false
            }
            Node::RepeatUntilFailure { child, cap } => {
                let mut iterations = 0usize;
                while child.evaluate(ctx, state, blackboard, orders) {
                    iterations += 1;
                    if matches!(cap, Some(limit) if iterations >= *limit) {
                        tracing::warn!(
                            turn = ctx.turn,
                            iterations,
                            "repeat-until-failure hit its iteration cap"
                        );
                        break;
                    }
                }
                false
            }
            Node::RepeatN { child, n, counter } => {
                let mut succeeded = true;
                while *counter < *n {
                    let ok = child.evaluate(ctx, state, blackboard, orders);
                    *counter += 1;
                    if !ok {
                        succeeded = false;
                        break;
                    }
                }
                succeeded
            }
            Node::Check { predicate, .. } => predicate(state, &*blackboard),
            Node::Action { label, effect } => match effect(state, &*blackboard) {
                None => false,
                Some(order) if order.is_noop() => {
                    tracing::debug!(action = *label, ?order, "dropping empty order");
                    false
                }
                Some(order) => {
                    let accepted = orders.submit(&order);
                    if !accepted {
                        tracing::debug!(action = *label, ?order, "order rejected by sink");
                    }
                    accepted
                }
            },
            Node::SetVariable { key, compute } => {
                let value = compute(state, &*blackboard);
                tracing::trace!(key = key.name(), ?value, "set variable");
                blackboard.set(*key, value);
                true
            }
            Node::IsVariableAbsent(key) => blackboard.is_absent(*key),
            Node::PushToStack { stack, item } => {
                let Some(value) = blackboard.get(*item).cloned() else {
                    panic!(
                        "PushToStack: item key `{}` was never set before pushing onto `{}`",
                        item.name(),
                        stack.name()
                    );
                };
                if value.is_absent() {
                    false
                } else {
                    blackboard.push(*stack, value);
                    true
                }
            }
            Node::PopFromStack { stack, item } => match blackboard.pop(*stack) {
                Some(value) => {
                    blackboard.set(*item, value);
                    true
                }
                None => false,
            },
        };

        tracing::trace!(turn = ctx.turn, node = %self, result, "evaluated");
        result
    }
}

impl<S> fmt::Display for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Selector { name, .. } => write_named(f, "Selector", *name),
            Node::Sequence { name, .. } => write_named(f, "Sequence", *name),
            Node::Inverter(_) => f.write_str("Inverter"),
            Node::Succeeder(_) => f.write_str("Succeeder"),
            Node::Failer(_) => f.write_str("Failer"),
            Node::RepeatUntilFailure { cap: None, .. } => f.write_str("UntilFailure"),
            Node::RepeatUntilFailure { cap: Some(cap), .. } => {
                write!(f, "UntilFailure (cap={cap})")
            }
            Node::RepeatN { n, .. } => write!(f, "RepeatN (n={n})"),
            Node::Check { label, .. } => write!(f, "Check: {label}"),
            Node::Action { label, .. } => write!(f, "Action: {label}"),
            Node::SetVariable { key, .. } => write!(f, "SetVariable: {}", key.name()),
            Node::IsVariableAbsent(key) => write!(f, "IsVariableAbsent: {}", key.name()),
            Node::PushToStack { stack, item } => {
                write!(f, "PushToStack: {} <- {}", stack.name(), item.name())
            }
            Node::PopFromStack { stack, item } => {
                write!(f, "PopFromStack: {} -> {}", stack.name(), item.name())
            }
        }
    }
}

fn write_named(f: &mut fmt::Formatter<'_>, kind: &str, name: Option<&str>) -> fmt::Result {
    match name {
        Some(name) => write!(f, "{kind}: {name}"),
        None => f.write_str(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_core::GameState;

    #[test]
    fn render_tree_indents_children() {
        let tree: Node<GameState> = Node::selector(vec![
            Node::sequence(vec![Node::check("ready", |_, _| true)]).named("attack"),
            Node::inverter(Node::is_absent(BbKey::new("target"))),
        ])
        .named("root");

        let rendered = tree.render_tree();
        assert_eq!(
            rendered,
            "Selector: root\n\
             | Sequence: attack\n\
             | | Check: ready\n\
             | Inverter\n\
             | | IsVariableAbsent: target\n"
        );
    }

    #[test]
    fn named_is_ignored_on_leaves() {
        let leaf: Node<GameState> = Node::is_absent(BbKey::new("x")).named("ignored");
        assert_eq!(leaf.to_string(), "IsVariableAbsent: x");
    }
}
