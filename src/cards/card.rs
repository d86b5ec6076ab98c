use super::suit::Suit;
use crate::Value;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// A troop card. Equality is by (suit, value); the 60 troops are all distinct.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    value: Value,
}

impl Card {
    pub fn suit(&self) -> Suit {
        self.suit
    }
    pub fn value(&self) -> Value {
        self.value
    }
    /// suit-major ordering key: suit * 100 + (value - 1)
    pub fn suit_sorting_value(&self) -> u32 {
        u32::from(u8::from(self.suit)) * 100 + u32::from(self.value.saturating_sub(1))
    }
}

impl From<(Suit, Value)> for Card {
    fn from((suit, value): (Suit, Value)) -> Self {
        debug_assert!((1..=crate::VALUES as Value).contains(&value));
        Self { suit, value }
    }
}

/// "R3", "r 10", "O10"
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit = chars
            .next()
            .ok_or_else(|| "empty card string".to_string())
            .and_then(|c| Suit::try_from(c))?;
        let value = chars
            .as_str()
            .trim()
            .parse::<Value>()
            .map_err(|e| format!("invalid card value in {:?}: {}", s, e))?;
        match value {
            1..=10 => Ok(Self { suit, value }),
            _ => Err(format!("card value out of range in {:?}", s)),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let suit = self.suit.to_string().to_uppercase();
        write!(f, "{} {}", &suit[..1], self.value)
    }
}
