//! Turn loop: read one turn, evaluate the tree, answer.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use pw_bt::TreePolicy;
use pw_core::{GameState, Snapshot, TurnContext};
use pw_strategy::{build_tree, StrategyConfig};

use crate::orders::OrderBook;
use crate::protocol;

/// The default strategy tree plus the turn counter.
pub struct Bot {
    policy: TreePolicy<GameState>,
    ctx: TurnContext,
}

impl Bot {
    pub fn new(config: &StrategyConfig) -> Self {
        Self {
            policy: TreePolicy::new(build_tree(config)),
            ctx: TurnContext::default(),
        }
    }

    pub fn policy(&self) -> &TreePolicy<GameState> {
        &self.policy
    }

    /// Turns answered so far.
    pub fn turns_played(&self) -> u64 {
        self.ctx.turn
    }

    /// Answer one turn.
    ///
    /// A turn that fails to parse is logged and answered with a bare `go`, so the game goes on.
    pub fn play_turn<W: Write>(&mut self, turn_text: &str, out: &mut W) -> io::Result<()> {
        let turn = self.ctx.turn;
        match protocol::parse_state(turn_text) {
            Ok(state) => {
                let mut book = OrderBook::new(&state);
                let outcome = self.policy.evaluate_turn(&self.ctx, &state, &mut book);
                tracing::info!(
                    turn,
                    planets = state.planets().len(),
                    fleets = state.fleets().len(),
                    outcome,
                    orders = book.len(),
                    "turn evaluated"
                );
                book.write_to(out)?;
            }
            Err(err) => {
                tracing::error!(turn, %err, "malformed turn, sending no orders");
                protocol::write_orders(out, &[])?;
            }
        }
        self.ctx = self.ctx.next();
        Ok(())
    }

    /// Play until `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        let mut turn_text = String::new();
        for line in input.lines() {
            let line = line.context("Failed to read from the game server")?;
            if line.trim() == "go" {
                self.play_turn(&turn_text, &mut out)
                    .context("Failed to send orders")?;
                turn_text.clear();
            } else {
                turn_text.push_str(&line);
                turn_text.push('\n');
            }
        }
        tracing::info!(turns = self.ctx.turn, "input closed");
        Ok(())
    }
}
