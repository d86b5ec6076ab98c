use serde::Serialize;

/// Steps of a single turn. Wrapping past Draw hands the turn to the opponent.
#[derive(Debug, Default, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Placement,
    Claim,
    Draw,
}

impl Phase {
    /// None when the turn is over.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Placement => Some(Self::Claim),
            Self::Claim => Some(Self::Draw),
            Self::Draw => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placement => write!(f, "placement"),
            Self::Claim => write!(f, "claim"),
            Self::Draw => write!(f, "draw"),
        }
    }
}
