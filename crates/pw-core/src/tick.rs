/// Per-evaluation context handed to every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnContext {
    /// Zero-based turn counter maintained by the turn driver.
    pub turn: u64,
}

impl TurnContext {
    pub fn new(turn: u64) -> Self {
        Self { turn }
    }

    pub fn next(self) -> Self {
        Self {
            turn: self.turn.wrapping_add(1),
        }
    }
}
