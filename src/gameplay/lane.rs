use crate::Seat;
use crate::Strength;
use crate::cards::*;
use serde::Serialize;

/// One of the nine contested slots. Each player owns a side of up to three cards.
///
/// `claimable` is a cache computed for the player who last placed a card,
/// and is only refreshed after that player's next placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lane {
    cards: [Deck; crate::SEATS],
    claimed: Option<Seat>,
    claimable: bool,
}

impl Lane {
    pub fn side(&self, seat: Seat) -> &Deck {
        &self.cards[seat]
    }
    pub fn claimed(&self) -> Option<Seat> {
        self.claimed
    }
    pub fn is_claimed(&self) -> bool {
        self.claimed.is_some()
    }
    pub fn is_claimable(&self) -> bool {
        self.claimable
    }
    pub fn is_complete(&self, seat: Seat) -> bool {
        self.cards[seat].len() >= crate::SIDE
    }
    /// unclaimed with room on this seat's side
    pub fn accepts(&self, seat: Seat) -> bool {
        !self.is_claimed() && !self.is_complete(seat)
    }
    pub fn strength(&self, seat: Seat) -> Strength {
        Formation::strength(self.cards[seat].cards())
    }
    pub fn formation(&self, seat: Seat) -> Formation {
        Formation::from(self.cards[seat].cards())
    }
}

impl Lane {
    pub(crate) fn place(&mut self, seat: Seat, card: Card) {
        self.cards[seat] = self.cards[seat].push(card);
    }
    pub(crate) fn claim(&mut self, seat: Seat) {
        self.claimed = Some(seat);
        self.claimable = false;
    }
    pub(crate) fn cache(&mut self, claimable: bool) {
        self.claimable = claimable;
    }
}

impl From<[Deck; crate::SEATS]> for Lane {
    fn from(cards: [Deck; crate::SEATS]) -> Self {
        Self {
            cards,
            claimed: None,
            claimable: false,
        }
    }
}
