use super::card::Card;
use crate::Strength;
use serde::Serialize;

/// Shape of the cards on one side of a lane, weakest first.
/// The discriminant is the rank that lands in the hundreds digit of a strength.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Formation {
    /// fewer than three cards
    #[default]
    None = 0,
    Fray = 1,
    /// consecutive values, not all one suit
    Skirmish = 2,
    /// one suit, not consecutive
    Column = 3,
    /// one value
    Square = 4,
    /// one suit and consecutive
    Wedge = 5,
}

impl Formation {
    pub fn rank(&self) -> Strength {
        *self as Strength
    }

    /// rank * 100 + sum of values. card sums never exceed 30,
    /// so a stronger formation always compares above a weaker one.
    pub fn strength(cards: &[Card]) -> Strength {
        Self::from(cards).rank() * 100
            + cards
                .iter()
                .map(|c| Strength::from(c.value()))
                .sum::<Strength>()
    }

    fn same_suit(cards: &[Card]) -> bool {
        cards.windows(2).all(|w| w[0].suit() == w[1].suit())
    }
    fn same_value(cards: &[Card]) -> bool {
        cards.windows(2).all(|w| w[0].value() == w[1].value())
    }
    /// each value exactly one above the previous once sorted. no wraparound.
    fn straight(cards: &[Card]) -> bool {
        let mut values = cards.iter().map(|c| c.value()).collect::<Vec<_>>();
        values.sort_unstable();
        values.windows(2).all(|w| w[1] == w[0] + 1)
    }
}

/// first match wins: Wedge, Square, Column, Skirmish, Fray
impl From<&[Card]> for Formation {
    fn from(cards: &[Card]) -> Self {
        if cards.len() < crate::SIDE {
            return Self::None;
        }
        let suited = Self::same_suit(cards);
        let straight = Self::straight(cards);
        match () {
            _ if suited && straight => Self::Wedge,
            _ if Self::same_value(cards) => Self::Square,
            _ if suited => Self::Column,
            _ if straight => Self::Skirmish,
            _ => Self::Fray,
        }
    }
}

impl std::fmt::Display for Formation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::None => "none",
                Self::Fray => "fray",
                Self::Skirmish => "skirmish",
                Self::Column => "column",
                Self::Square => "square",
                Self::Wedge => "wedge",
            }
        )
    }
}
