use pw_core::{Blackboard, Order, Value};

/// Read-only test over the snapshot and blackboard.
pub type Predicate<S> = Box<dyn Fn(&S, &Blackboard) -> bool>;

/// Produces at most one order. The runtime submits it; `None` means "nothing to do".
pub type Effect<S> = Box<dyn FnMut(&S, &Blackboard) -> Option<Order>>;

/// Computes the value a `SetVariable` node writes.
pub type Compute<S> = Box<dyn Fn(&S, &Blackboard) -> Value>;
