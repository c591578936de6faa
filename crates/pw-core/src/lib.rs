//! Deterministic, engine-agnostic Planet Wars primitives.
//!
//! Everything the decision engine reads (`Snapshot`) or writes (`OrderSink`, `Blackboard`) lives
//! here so that the tree runtime and the forecasting library share one vocabulary.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod ids;
pub mod order;
pub mod owner;
pub mod state;
pub mod tick;
pub mod world;

pub use blackboard::{BbKey, Blackboard, Value};
pub use ids::{FleetId, PlanetId};
pub use order::{NullSink, Order, OrderSink, RecordingSink};
pub use owner::Owner;
pub use state::GameState;
pub use tick::TurnContext;
pub use world::{Fleet, Planet, Ships, Snapshot, Turns};
