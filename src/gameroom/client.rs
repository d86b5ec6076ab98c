use super::*;
use crate::ID;
use crate::Seat;
use rand::Rng;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Opaque credentials handed to whoever transports them to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub session: ID<Session>,
    pub client: ID<Client>,
    pub key: String,
    pub seat: Seat,
}

/// A player slot. Owned by its session for the session's whole life.
///
/// The outbound queue is the transport handle: present only while a
/// connection is attached, replaced outright when the player reconnects.
#[derive(Debug)]
pub struct Client {
    id: ID<Client>,
    key: String,
    seat: Seat,
    nickname: String,
    ready: bool,
    outbox: Option<(u64, UnboundedSender<SessionMessage>)>,
}

/// What either player may know about a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub index: Seat,
    pub nickname: String,
    pub ready: bool,
    pub connected: bool,
}

impl Client {
    pub fn new(seat: Seat, nickname: Option<&str>) -> Self {
        Self {
            id: ID::default(),
            key: Self::secret(),
            seat,
            nickname: Self::sanitize(nickname),
            ready: false,
            outbox: None,
        }
    }
    pub fn id(&self) -> ID<Client> {
        self.id
    }
    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn nickname(&self) -> &str {
        &self.nickname
    }
    pub fn is_ready(&self) -> bool {
        self.ready
    }
    pub fn is_connected(&self) -> bool {
        self.outbox.is_some()
    }
    pub fn info(&self) -> ClientInfo {
        ClientInfo {
            index: self.seat,
            nickname: self.nickname.clone(),
            ready: self.ready,
            connected: self.is_connected(),
        }
    }
    pub fn credentials(&self, session: ID<Session>) -> Credentials {
        Credentials {
            session,
            client: self.id,
            key: self.key.clone(),
            seat: self.seat,
        }
    }
    /// compares every byte regardless of where the first mismatch is
    pub fn verify(&self, id: ID<Client>, key: &str) -> bool {
        id == self.id
            && key.len() == self.key.len()
            && key
                .bytes()
                .zip(self.key.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl Client {
    pub(crate) fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
    pub(crate) fn attach(&mut self, number: u64, outbox: UnboundedSender<SessionMessage>) {
        self.outbox = Some((number, outbox));
    }
    /// Drops the transport only if `number` is still the current connection.
    pub(crate) fn detach(&mut self, number: u64) -> bool {
        match self.outbox {
            Some((current, _)) if current == number => {
                self.outbox = None;
                true
            }
            _ => false,
        }
    }
    /// Drops the transport whatever connection it belongs to.
    pub(crate) fn release(&mut self) {
        self.outbox = None;
    }
    /// false when there is no connection or it has gone away
    pub(crate) fn send(&self, message: SessionMessage) -> bool {
        self.outbox
            .as_ref()
            .map(|(_, tx)| tx.send(message).is_ok())
            .unwrap_or(false)
    }

    /// 32 random bytes as lowercase hex
    fn secret() -> String {
        rand::rng()
            .random::<[u8; 32]>()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
    fn sanitize(nickname: Option<&str>) -> String {
        nickname
            .map(|s| s.trim().chars().take(crate::MAX_NICKNAME).collect::<String>())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| crate::DEFAULT_NICKNAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_credentials() {
        let a = Client::new(0, None);
        let b = Client::new(1, Some("  Alexander the Great of Macedon  "));
        assert_ne!(a.id(), b.id());
        assert_eq!(a.key.len(), 64);
        assert!(a.key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.key, b.key);
        assert_eq!(a.nickname(), crate::DEFAULT_NICKNAME);
        assert_eq!(b.nickname(), "Alexander the Great of M");
        assert_eq!(Client::new(0, Some("   ")).nickname(), crate::DEFAULT_NICKNAME);
    }

    #[test]
    fn verify_needs_both_halves() {
        let a = Client::new(0, None);
        let b = Client::new(1, None);
        assert!(a.verify(a.id(), &a.key));
        assert!(!a.verify(b.id(), &a.key));
        assert!(!a.verify(a.id(), &b.key));
        assert!(!a.verify(a.id(), ""));
    }

    #[test]
    fn stale_connection_cannot_detach() {
        let mut client = Client::new(0, None);
        let (old, _) = tokio::sync::mpsc::unbounded_channel();
        let (new, _) = tokio::sync::mpsc::unbounded_channel();
        client.attach(1, old);
        client.attach(2, new);
        assert!(!client.detach(1));
        assert!(client.is_connected());
        assert!(client.detach(2));
        assert!(!client.is_connected());
    }
}
