//! Forecasting and ranking helpers for Planet Wars decision making.
//!
//! Every function here is pure over a read-only [`Snapshot`](pw_core::Snapshot): the same snapshot
//! always yields the same answer, and nothing is cached between calls. Ship counts and turns are
//! `i64`; fractional results truncate toward zero.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod defense;
pub mod fleets;
pub mod rank;
pub mod simulate;

pub use defense::{defense_priority, DefensePriority};
pub use fleets::{
    attacked_planets, attacking_fleets, defending_fleets, free_ships, free_ships_after,
    has_sent_fleet, ships_pinned, soonest_attacker,
};
pub use rank::{
    nearest_planets, production_factor, rank_by_strength, rank_by_strength_desc, total_strength,
};
pub use simulate::{
    capture_turn, forecast_at, forecast_owner, forecast_ship_count, max_reinforcements, Forecast,
};
