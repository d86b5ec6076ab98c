use super::*;
use crate::ID;
use crate::Seat;
use crate::Timestamp;
use crate::gameplay::Game;
use tokio::sync::mpsc::UnboundedSender;

/// The part of a session touched both by its loop and by request handlers
/// outside it: roster, ready flags, chat log and status.
///
/// Always held behind a mutex, and only for the length of one operation.
/// The game itself never lives here.
#[derive(Debug)]
pub struct Table {
    id: ID<Session>,
    created: Timestamp,
    status: Status,
    clients: [Option<Client>; crate::SEATS],
    chat: Vec<ChatMessage>,
    connections: u64,
}

impl Table {
    /// Seats the creator in slot 0.
    pub fn new(id: ID<Session>, nickname: Option<&str>) -> (Self, Credentials) {
        let host = Client::new(0, nickname);
        let credentials = host.credentials(id);
        let table = Self {
            id,
            created: crate::now(),
            status: Status::Created,
            clients: [Some(host), None],
            chat: Vec::new(),
            connections: 0,
        };
        (table, credentials)
    }

    pub fn status(&self) -> Status {
        self.status
    }
    pub fn client(&self, seat: Seat) -> Option<&Client> {
        self.clients.get(seat).and_then(Option::as_ref)
    }
    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id,
            status: self.status,
            clients: [
                self.client(0).map(Client::info),
                self.client(1).map(Client::info),
            ],
            chat: self.chat.clone(),
            created_at: self.created,
        }
    }
    /// both seats taken, connected and ready, and no match yet
    pub fn is_startable(&self) -> bool {
        self.status < Status::InProgress
            && self
                .clients
                .iter()
                .all(|c| c.as_ref().is_some_and(|c| c.is_connected() && c.is_ready()))
    }
}

impl Table {
    /// Seats a second player in slot 1.
    pub fn join(&mut self, nickname: Option<&str>) -> Result<Credentials, SessionError> {
        if self.status == Status::Ended || self.clients[1].is_some() {
            return Err(SessionError::SessionFull);
        }
        let guest = Client::new(1, nickname);
        let credentials = guest.credentials(self.id);
        self.clients[1] = Some(guest);
        Ok(credentials)
    }

    pub fn authenticate(&self, client: ID<Client>, key: &str) -> Result<Seat, SessionError> {
        self.clients
            .iter()
            .flatten()
            .find(|c| c.verify(client, key))
            .map(Client::seat)
            .ok_or(SessionError::NotAuthorized)
    }

    /// Installs a fresh outbound queue for the seat, replacing any previous
    /// one. Returns the number identifying this connection.
    pub fn attach(&mut self, seat: Seat, outbox: UnboundedSender<SessionMessage>) -> Result<u64, SessionError> {
        self.connections += 1;
        let number = self.connections;
        self.clients
            .get_mut(seat)
            .and_then(Option::as_mut)
            .map(|c| c.attach(number, outbox))
            .map(|_| number)
            .ok_or(SessionError::NotAuthorized)
    }

    /// True if `number` was still the seat's current connection.
    pub fn detach(&mut self, seat: Seat, number: u64) -> bool {
        self.clients
            .get_mut(seat)
            .and_then(Option::as_mut)
            .map(|c| c.detach(number))
            .unwrap_or(false)
    }

    pub fn set_ready(&mut self, seat: Seat, ready: bool) -> Result<(), SessionError> {
        match self.status {
            Status::Ended => Err(SessionError::Closed),
            Status::InProgress => Err(SessionError::AlreadyStarted),
            _ => self
                .clients
                .get_mut(seat)
                .and_then(Option::as_mut)
                .map(|c| c.set_ready(ready))
                .ok_or(SessionError::NotAuthorized),
        }
    }

    pub fn say(&mut self, seat: Seat, content: &str) -> Result<(), SessionError> {
        let nickname = self
            .client(seat)
            .map(Client::nickname)
            .ok_or(SessionError::NotAuthorized)?;
        let message = ChatMessage::new(seat, nickname, content).ok_or(SessionError::EmptyChat)?;
        self.chat.push(message);
        Ok(())
    }

    /// Hangs up every connection. Writers see their queue close and exit.
    pub fn release(&mut self) {
        self.clients
            .iter_mut()
            .flatten()
            .for_each(Client::release);
    }

    /// Moves status forward. Never regresses.
    pub fn advance(&mut self, status: Status) {
        if status > self.status {
            self.status = status;
        }
    }

    /// Flips to InProgress if the start condition holds. True exactly once.
    pub fn launch(&mut self) -> bool {
        match self.is_startable() {
            true => {
                self.advance(Status::InProgress);
                true
            }
            false => false,
        }
    }
}

impl Table {
    fn message(&self, kind: MessageKind, seat: Seat, game: Option<&Game>) -> SessionMessage {
        SessionMessage::new(kind, seat, game.map(|g| g.view(seat)), self.snapshot())
    }

    /// Sends to one seat, scoped to what that seat may see.
    pub fn unicast(&self, seat: Seat, message: SessionMessage) {
        let sent = self.client(seat).is_some_and(|c| c.send(message));
        if !sent {
            log::warn!("[table {}] P{} is not connected, dropped message", self.id, seat);
        }
    }

    pub fn reject(&self, seat: Seat, error: &SessionError, game: Option<&Game>) {
        log::warn!("[table {}] rejected P{}: {}", self.id, seat, error);
        self.unicast(seat, self.message(MessageKind::Error, seat, game).with_error(error));
    }

    /// Every connected seat gets its own view; disconnected seats are skipped.
    pub fn broadcast(&self, kind: MessageKind, game: Option<&Game>) {
        log::debug!("[table {}] broadcast {:?}", self.id, kind);
        for client in self.clients.iter().flatten() {
            match client.is_connected() {
                true => self.unicast(client.seat(), self.message(kind, client.seat(), game)),
                false => log::warn!("[table {}] skipped P{}, not connected", self.id, client.seat()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::sync::mpsc::unbounded_channel;

    fn table() -> (Table, Credentials) {
        Table::new(ID::default(), Some("Host"))
    }

    #[test]
    fn second_join_is_refused() {
        let (mut table, host) = table();
        let guest = table.join(None).unwrap();
        assert_eq!(host.seat, 0);
        assert_eq!(guest.seat, 1);
        assert_eq!(table.join(None), Err(SessionError::SessionFull));
        assert_eq!(table.authenticate(guest.client, &guest.key), Ok(1));
        assert_eq!(table.authenticate(guest.client, &host.key), Err(SessionError::NotAuthorized));
    }

    #[test]
    fn status_never_regresses() {
        let (mut table, _) = table();
        table.advance(Status::Ready);
        table.advance(Status::Created);
        assert_eq!(table.status(), Status::Ready);
        table.advance(Status::Ended);
        assert_eq!(table.join(None), Err(SessionError::SessionFull));
        assert_eq!(table.set_ready(0, true), Err(SessionError::Closed));
    }

    #[test]
    fn launch_needs_both_connected_and_ready() {
        let (mut table, _) = table();
        table.join(None).unwrap();
        let (tx0, _rx0) = unbounded_channel();
        let (tx1, _rx1) = unbounded_channel();
        table.attach(0, tx0).unwrap();
        table.set_ready(0, true).unwrap();
        table.set_ready(1, true).unwrap();
        assert!(!table.launch());
        table.attach(1, tx1).unwrap();
        assert!(table.launch());
        assert!(!table.launch());
        assert_eq!(table.status(), Status::InProgress);
        assert_eq!(table.set_ready(0, false), Err(SessionError::AlreadyStarted));
    }

    #[test]
    fn empty_chat_leaves_log_untouched() {
        let (mut table, _) = table();
        assert_eq!(table.say(0, "   "), Err(SessionError::EmptyChat));
        assert!(table.chat().is_empty());
        table.say(0, "hello").unwrap();
        assert_eq!(table.chat()[0].nickname, "Host");
        assert_eq!(table.say(1, "hi"), Err(SessionError::NotAuthorized));
    }

    #[test]
    fn broadcast_skips_disconnected() {
        let (mut table, _) = table();
        table.join(None).unwrap();
        let (tx, mut rx) = unbounded_channel();
        table.attach(1, tx).unwrap();
        table.broadcast(MessageKind::Sync, None);
        let message = rx.try_recv().unwrap();
        assert_eq!(message.kind, MessageKind::Sync);
        assert_eq!(message.client_idx, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn release_hangs_up_every_seat() {
        let (mut table, _) = table();
        table.join(None).unwrap();
        let (tx0, mut rx0) = unbounded_channel();
        let (tx1, mut rx1) = unbounded_channel();
        table.attach(0, tx0).unwrap();
        table.attach(1, tx1).unwrap();
        table.advance(Status::Ended);
        table.broadcast(MessageKind::SessionEnd, None);
        table.release();
        assert_eq!(rx0.try_recv().map(|m| m.kind), Ok(MessageKind::SessionEnd));
        assert_eq!(rx1.try_recv().map(|m| m.kind), Ok(MessageKind::SessionEnd));
        assert!(matches!(rx0.try_recv(), Err(TryRecvError::Disconnected)));
        assert!(matches!(rx1.try_recv(), Err(TryRecvError::Disconnected)));
        assert!(table.snapshot().clients.iter().flatten().all(|c| !c.connected));
    }
}
