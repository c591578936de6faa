#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allegiance of a planet or fleet, always from the acting bot's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Owner {
    Neutral,
    Ally,
    Enemy,
}

impl Owner {
    /// Decode the wire player number (`0` neutral, `1` us, `2` them).
    pub fn from_wire(player: u8) -> Option<Self> {
        match player {
            0 => Some(Owner::Neutral),
            1 => Some(Owner::Ally),
            2 => Some(Owner::Enemy),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            Owner::Neutral => 0,
            Owner::Ally => 1,
            Owner::Enemy => 2,
        }
    }

    /// The other player. Neutral has no opponent.
    pub fn opponent(self) -> Option<Self> {
        match self {
            Owner::Neutral => None,
            Owner::Ally => Some(Owner::Enemy),
            Owner::Enemy => Some(Owner::Ally),
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Owner::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_match_the_game() {
        assert_eq!(Owner::from_wire(0), Some(Owner::Neutral));
        assert_eq!(Owner::from_wire(1), Some(Owner::Ally));
        assert_eq!(Owner::from_wire(2), Some(Owner::Enemy));
        assert_eq!(Owner::from_wire(3), None);
        assert_eq!(Owner::Enemy.to_wire(), 2);
    }

    #[test]
    fn neutral_has_no_opponent() {
        assert_eq!(Owner::Neutral.opponent(), None);
        assert_eq!(Owner::Ally.opponent(), Some(Owner::Enemy));
        assert_eq!(Owner::Enemy.opponent(), Some(Owner::Ally));
    }
}
