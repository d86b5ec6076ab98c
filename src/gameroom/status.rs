use serde::Serialize;

/// Lifecycle of a session. Only ever moves forward.
#[derive(Debug, Default, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// slot 0 seated, loop not yet running
    #[default]
    Created,
    /// loop running, waiting for both players to be ready
    Ready,
    /// match underway
    InProgress,
    Ended,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Ready => write!(f, "ready"),
            Self::InProgress => write!(f, "in progress"),
            Self::Ended => write!(f, "ended"),
        }
    }
}
