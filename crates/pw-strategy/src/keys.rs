//! Blackboard slots shared by the default topology.
//!
//! Every sub-tree writes the keys it depends on before reading them, so values left over from an
//! earlier turn are never trusted. `COMMITTED` is the exception: the root clears it once per turn.

use pw_core::BbKey;

/// Planet the muster-and-capture sub-tree attacks.
pub const CAPTURE_TARGET: BbKey = BbKey::new("capture_target");
/// Allied planets still to be considered as muster sources, nearest on top.
pub const MUSTER_CANDIDATES: BbKey = BbKey::new("muster_candidates");
pub const MUSTER_SOURCE: BbKey = BbKey::new("muster_source");
/// Order under construction (muster) or being issued.
pub const ORDER: BbKey = BbKey::new("order");
/// Orders queued by the muster loop.
pub const ORDERS: BbKey = BbKey::new("orders");
pub const ATTACK_STRENGTH: BbKey = BbKey::new("attack_strength");
/// Ships of the current attack the engine has accepted so far.
pub const ATTACK_ISSUED: BbKey = BbKey::new("attack_issued");
/// Latest arrival turn among the queued orders.
pub const ATTACK_ARRIVAL: BbKey = BbKey::new("attack_arrival");
/// Neutral planets under enemy attack that have not been examined yet.
pub const STEAL_CANDIDATES: BbKey = BbKey::new("steal_candidates");
pub const STEAL_TARGET: BbKey = BbKey::new("steal_target");
/// `1` once a steal has been committed this turn.
pub const STEAL_COMMITTED: BbKey = BbKey::new("steal_committed");
/// Orders accepted this turn. Ships listed here are no longer free at their source.
pub const COMMITTED: BbKey = BbKey::new("committed");
