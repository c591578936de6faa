//! Strategy content for the Planet Wars bot: the condition and action leaves, the sub-trees built
//! from them and the default topology.
//!
//! Nothing here is special to the engine. The tree returned by [`build_tree`] is one assembly of
//! `pw-bt` constructors; any other topology can reuse the same leaves.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behaviors;
pub mod checks;
pub mod config;
pub mod keys;
pub mod topology;

pub use config::{DefenseConfig, OffenseConfig, SpreadConfig, StealConfig, StrategyConfig};
pub use topology::build_tree;
