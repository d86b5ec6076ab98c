use super::error::MoveError;
use crate::cards::Card;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveAction {
    Placement,
    Claim,
    Draw,
}

/// Move as it arrives on the wire: an action plus whichever fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    pub action: MoveAction,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub lane: Option<usize>,
    #[serde(default, alias = "tacticsDeck")]
    pub from_tactics_deck: Option<bool>,
}

/// A move with every required field present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Place(Card, usize),
    Claim(usize),
    /// top of the troop deck
    Draw,
}

impl TryFrom<&MoveData> for Move {
    type Error = MoveError;
    fn try_from(data: &MoveData) -> Result<Self, Self::Error> {
        match data.action {
            MoveAction::Placement => Ok(Self::Place(
                data.card.ok_or(MoveError::Malformed("card"))?,
                data.lane.ok_or(MoveError::Malformed("lane"))?,
            )),
            MoveAction::Claim => Ok(Self::Claim(data.lane.ok_or(MoveError::Malformed("lane"))?)),
            MoveAction::Draw => match data.from_tactics_deck {
                Some(true) => Err(MoveError::TacticsUnsupported),
                _ => Ok(Self::Draw),
            },
        }
    }
}

impl From<Move> for MoveData {
    fn from(m: Move) -> Self {
        let (action, card, lane) = match m {
            Move::Place(card, lane) => (MoveAction::Placement, Some(card), Some(lane)),
            Move::Claim(lane) => (MoveAction::Claim, None, Some(lane)),
            Move::Draw => (MoveAction::Draw, None, None),
        };
        Self {
            action,
            card,
            lane,
            from_tactics_deck: matches!(m, Move::Draw).then_some(false),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Place(card, lane) => write!(f, "place {} on lane {}", card, lane),
            Self::Claim(lane) => write!(f, "claim lane {}", lane),
            Self::Draw => write!(f, "draw"),
        }
    }
}
