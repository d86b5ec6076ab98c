use super::lane::Lane;
use super::phase::Phase;
use crate::Seat;
use crate::cards::Deck;
use serde::Serialize;

/// What one player is allowed to see of a game.
/// The opponent's hand and the troop deck are reduced to their sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub active_player: Seat,
    pub turn_phase: Phase,
    pub lanes: Vec<Lane>,
    pub hand: Deck,
    pub troop_deck_size: usize,
    pub opponent_hand_size: usize,
}
