use crate::gameplay::MoveError;

/// Reasons a session refuses a request. Only the requester ever hears of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NotFound,
    SessionFull,
    NotAuthorized,
    /// inbound queue is saturated, retry later
    Busy,
    Closed,
    AlreadyStarted,
    NotStarted,
    EmptyChat,
    InvalidMessage(String),
    Move(MoveError),
}

impl SessionError {
    /// Stable machine-readable tag sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "notFound",
            Self::SessionFull => "sessionFull",
            Self::NotAuthorized => "notAuthorized",
            Self::Busy => "busy",
            Self::Closed => "closed",
            Self::AlreadyStarted => "alreadyStarted",
            Self::NotStarted => "notStarted",
            Self::EmptyChat => "emptyChat",
            Self::InvalidMessage(_) => "invalidMessage",
            Self::Move(_) => "invalidMove",
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(e: MoveError) -> Self {
        Self::Move(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidMessage(e.to_string())
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "session not found"),
            Self::SessionFull => write!(f, "session is full"),
            Self::NotAuthorized => write!(f, "invalid client credentials"),
            Self::Busy => write!(f, "session is busy, try again"),
            Self::Closed => write!(f, "session has ended"),
            Self::AlreadyStarted => write!(f, "match has already started"),
            Self::NotStarted => write!(f, "match has not started"),
            Self::EmptyChat => write!(f, "chat message is empty"),
            Self::InvalidMessage(reason) => write!(f, "invalid message: {}", reason),
            Self::Move(e) => write!(f, "invalid move: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Move(e) => Some(e),
            _ => None,
        }
    }
}
