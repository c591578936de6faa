//! Behavior tree runtime built on `pw-core`.
//!
//! Trees are plain values: a [`Node`] is a closed enum of composites, decorators and leaves, and
//! one call to [`Node::evaluate`] walks it top-down against a single snapshot. [`TreePolicy`] owns a
//! root together with the blackboard it writes to and is what a turn driver holds on to.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod nodes;
pub mod policy;

pub use bt::{Compute, Effect, Predicate};
pub use nodes::Node;
pub use policy::TreePolicy;
