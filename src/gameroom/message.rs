use super::*;
use crate::ID;
use crate::Seat;
use crate::Timestamp;
use crate::gameplay::Move;
use crate::gameplay::MoveData;
use crate::gameplay::View;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// INBOUND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessageKind {
    #[serde(alias = "set_ready")]
    SetReady,
    Move,
    Chat,
    Close,
}

/// Optional fields of an inbound message. Which ones matter depends on its kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default, rename = "move")]
    pub play: Option<MoveData>,
    #[serde(default)]
    pub chat: Option<String>,
}

/// Inbound frame as decoded from a client connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    #[serde(rename = "type")]
    pub kind: ClientMessageKind,
    #[serde(default, alias = "payload")]
    pub data: Option<Payload>,
}

/// An inbound message with its required fields checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ready(bool),
    Move(Move),
    Chat(String),
    Close,
}

impl TryFrom<&str> for ClientMessage {
    type Error = SessionError;
    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Ok(serde_json::from_str(text)?)
    }
}

impl TryFrom<ClientMessage> for Command {
    type Error = SessionError;
    fn try_from(message: ClientMessage) -> Result<Self, Self::Error> {
        let data = message.data.unwrap_or_default();
        let missing = |field: &str| SessionError::InvalidMessage(format!("missing {}", field));
        match message.kind {
            ClientMessageKind::SetReady => data.ready.map(Self::Ready).ok_or_else(|| missing("ready")),
            ClientMessageKind::Chat => data.chat.map(Self::Chat).ok_or_else(|| missing("chat")),
            ClientMessageKind::Close => Ok(Self::Close),
            ClientMessageKind::Move => data
                .play
                .ok_or_else(|| missing("move"))
                .and_then(|m| Move::try_from(&m).map(Self::Move).map_err(SessionError::from)),
        }
    }
}

impl From<Command> for ClientMessage {
    fn from(command: Command) -> Self {
        let (kind, data) = match command {
            Command::Ready(ready) => (
                ClientMessageKind::SetReady,
                Payload {
                    ready: Some(ready),
                    ..Payload::default()
                },
            ),
            Command::Move(m) => (
                ClientMessageKind::Move,
                Payload {
                    play: Some(MoveData::from(m)),
                    ..Payload::default()
                },
            ),
            Command::Chat(chat) => (
                ClientMessageKind::Chat,
                Payload {
                    chat: Some(chat),
                    ..Payload::default()
                },
            ),
            Command::Close => (ClientMessageKind::Close, Payload::default()),
        };
        Self {
            kind,
            data: Some(data),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(true) => write!(f, "ready"),
            Self::Ready(false) => write!(f, "unready"),
            Self::Move(m) => write!(f, "{}", m),
            Self::Chat(text) => write!(f, "chat {:?}", text),
            Self::Close => write!(f, "close"),
        }
    }
}

// ============================================================================
// OUTBOUND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    Sync,
    ClientReady,
    ClientUnready,
    ClientMove,
    ClientChat,
    SessionStart,
    SessionEnd,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl From<&SessionError> for ErrorBody {
    fn from(e: &SessionError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

/// Public, point-in-time picture of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: ID<Session>,
    pub status: Status,
    pub clients: [Option<ClientInfo>; crate::SEATS],
    pub chat: Vec<ChatMessage>,
    pub created_at: Timestamp,
}

/// Outbound frame, scoped to the client it is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub timestamp: Timestamp,
    pub client_idx: Seat,
    pub state: Option<View>,
    pub session: Snapshot,
    pub error: Option<ErrorBody>,
}

impl SessionMessage {
    pub fn new(kind: MessageKind, seat: Seat, state: Option<View>, session: Snapshot) -> Self {
        Self {
            kind,
            timestamp: crate::now(),
            client_idx: seat,
            state,
            session,
            error: None,
        }
    }
    pub fn with_error(self, e: &SessionError) -> Self {
        Self {
            kind: MessageKind::Error,
            error: Some(ErrorBody::from(e)),
            ..self
        }
    }
}
