//! Planet Wars bot plumbing: parse the server's turn text, evaluate the strategy tree, answer with
//! orders.

#![forbid(unsafe_code)]

pub mod config;
pub mod driver;
pub mod orders;
pub mod protocol;

pub use config::BotConfig;
pub use driver::Bot;
pub use orders::{OrderBook, OrderRejection};
pub use protocol::{parse_state, ProtocolError, MAX_COUNT};
