use super::phase::Phase;

/// Reasons a move is refused. A refused move never touches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    WrongPhase { expected: Phase, actual: Phase },
    NotYourTurn,
    Malformed(&'static str),
    CardNotInHand,
    LaneOutOfRange,
    LaneClaimed,
    LaneFull,
    NotClaimable,
    EmptyDeck,
    TacticsUnsupported,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongPhase { expected, actual } => {
                write!(f, "move requires {} phase, game is in {} phase", expected, actual)
            }
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::Malformed(field) => write!(f, "move is missing {}", field),
            Self::CardNotInHand => write!(f, "card is not in hand"),
            Self::LaneOutOfRange => write!(f, "lane does not exist"),
            Self::LaneClaimed => write!(f, "lane is already claimed"),
            Self::LaneFull => write!(f, "lane side is full"),
            Self::NotClaimable => write!(f, "lane cannot be claimed"),
            Self::EmptyDeck => write!(f, "troop deck is empty"),
            Self::TacticsUnsupported => write!(f, "tactics deck is not available"),
        }
    }
}

impl std::error::Error for MoveError {}
