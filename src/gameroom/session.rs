use super::*;
use crate::ID;
use crate::Seat;
use crate::gameplay::Move;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TrySendError;

/// One attached transport: its number, and the queue its writer drains.
#[derive(Debug)]
pub struct Connection {
    pub seat: Seat,
    pub number: u64,
    pub outbox: UnboundedReceiver<SessionMessage>,
}

/// Cloneable handle to one match.
///
/// Producers only ever reach the game through the bounded inbound queue.
/// The loop is spawned lazily, on the first connection.
#[derive(Debug, Clone)]
pub struct Session {
    id: ID<Session>,
    table: Arc<Mutex<Table>>,
    inbox: mpsc::Sender<Inbound>,
    room: Arc<Mutex<Option<Room>>>,
}

impl Session {
    /// New session with its creator seated in slot 0.
    pub fn new(capacity: usize, nickname: Option<&str>) -> (Self, Credentials) {
        let id = ID::default();
        let (table, credentials) = Table::new(id, nickname);
        let table = Arc::new(Mutex::new(table));
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let room = Room::new(id, table.clone(), rx);
        let session = Self {
            id,
            table,
            inbox: tx,
            room: Arc::new(Mutex::new(Some(room))),
        };
        (session, credentials)
    }

    pub fn id(&self) -> ID<Session> {
        self.id
    }
    pub async fn status(&self) -> Status {
        self.table.lock().await.status()
    }
    pub async fn snapshot(&self) -> Snapshot {
        self.table.lock().await.snapshot()
    }
    pub async fn add_client(&self, nickname: Option<&str>) -> Result<Credentials, SessionError> {
        self.table
            .lock()
            .await
            .join(nickname)
            .inspect(|c| log::info!("[session {}] P{} joined", self.id, c.seat))
    }
    pub async fn authenticate(&self, client: ID<Client>, key: &str) -> Result<Seat, SessionError> {
        self.table.lock().await.authenticate(client, key)
    }
}

impl Session {
    /// Attaches a new transport for the seat, superseding any earlier one.
    pub async fn connect(&self, seat: Seat) -> Result<Connection, SessionError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let number = {
            let mut table = self.table.lock().await;
            if table.status() == Status::Ended {
                return Err(SessionError::Closed);
            }
            table.attach(seat, tx)?
        };
        self.spawn().await;
        self.notify(Inbound::Connected(seat)).await;
        Ok(Connection {
            seat,
            number,
            outbox: rx,
        })
    }

    /// Detaches the seat's transport if `number` is still the current one.
    pub async fn disconnect(&self, seat: Seat, number: u64) {
        if self.table.lock().await.detach(seat, number) {
            self.notify(Inbound::Disconnected(seat)).await;
        }
    }

    /// Queues a message for the loop without waiting for room in the queue.
    pub fn submit(&self, seat: Seat, message: ClientMessage) -> Result<(), SessionError> {
        self.inbox
            .try_send(Inbound::Message(seat, message))
            .map_err(|e| match e {
                TrySendError::Full(_) => SessionError::Busy,
                TrySendError::Closed(_) => SessionError::Closed,
            })
            .inspect_err(|e| log::warn!("[session {}] P{} submit refused: {}", self.id, seat, e))
    }

    /// Answers a seat directly, bypassing the loop. For failures that never
    /// reached it, such as undecodable frames or a saturated queue.
    pub async fn reject(&self, seat: Seat, error: &SessionError) {
        self.table.lock().await.reject(seat, error, None);
    }

    pub fn set_ready(&self, seat: Seat, ready: bool) -> Result<(), SessionError> {
        self.submit(seat, ClientMessage::from(Command::Ready(ready)))
    }
    pub fn submit_move(&self, seat: Seat, m: Move) -> Result<(), SessionError> {
        self.submit(seat, ClientMessage::from(Command::Move(m)))
    }
    pub fn submit_chat(&self, seat: Seat, text: &str) -> Result<(), SessionError> {
        self.submit(seat, ClientMessage::from(Command::Chat(text.to_string())))
    }
    pub fn close(&self, seat: Seat) -> Result<(), SessionError> {
        self.submit(seat, ClientMessage::from(Command::Close))
    }
}

impl Session {
    /// Starts the loop the first time through; later calls find nothing to start.
    async fn spawn(&self) {
        if let Some(room) = self.room.lock().await.take() {
            self.table.lock().await.advance(Status::Ready);
            tokio::spawn(room.run());
        }
    }

    /// Lifecycle events wait for room in the queue instead of being refused.
    /// Fails only once the loop has exited.
    async fn notify(&self, inbound: Inbound) {
        if let Err(e) = self.inbox.send(inbound).await {
            log::debug!("[session {}] loop gone, dropped {:?}", self.id, e.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn until(connection: &mut Connection, kind: MessageKind) -> SessionMessage {
        loop {
            let message = connection.outbox.recv().await.expect("session hung up");
            if message.kind == kind {
                return message;
            }
        }
    }

    async fn drain(connection: &mut Connection) -> Vec<SessionMessage> {
        let mut seen = Vec::new();
        loop {
            let message = connection.outbox.recv().await.expect("session hung up");
            let kind = message.kind;
            seen.push(message);
            if kind == MessageKind::SessionEnd {
                return seen;
            }
        }
    }

    #[tokio::test]
    async fn created_with_host_seated() {
        let (session, host) = Session::new(8, Some("Host"));
        assert_eq!(host.session, session.id());
        assert_eq!(host.seat, 0);
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.status, Status::Created);
        assert_eq!(snapshot.clients[0].as_ref().map(|c| c.nickname.as_str()), Some("Host"));
        assert!(snapshot.clients[1].is_none());
    }

    #[tokio::test]
    async fn third_client_is_refused() {
        let (session, _) = Session::new(8, None);
        let guest = session.add_client(None).await.unwrap();
        assert_eq!(guest.seat, 1);
        assert_eq!(session.add_client(None).await, Err(SessionError::SessionFull));
    }

    #[tokio::test]
    async fn bad_credentials_are_refused() {
        let (session, host) = Session::new(8, None);
        let guest = session.add_client(None).await.unwrap();
        assert_eq!(session.authenticate(host.client, &host.key).await, Ok(0));
        assert_eq!(session.authenticate(guest.client, &guest.key).await, Ok(1));
        assert_eq!(
            session.authenticate(host.client, &guest.key).await,
            Err(SessionError::NotAuthorized)
        );
        assert_eq!(
            session.authenticate(ID::default(), &host.key).await,
            Err(SessionError::NotAuthorized)
        );
    }

    #[tokio::test]
    async fn concurrent_ready_starts_exactly_once() {
        let (session, _) = Session::new(8, None);
        session.add_client(None).await.unwrap();
        let mut p0 = session.connect(0).await.unwrap();
        let mut p1 = session.connect(1).await.unwrap();
        assert_eq!(session.status().await, Status::Ready);
        let (a, b) = tokio::join!(
            async { session.set_ready(0, true) },
            async { session.set_ready(1, true) }
        );
        a.unwrap();
        b.unwrap();
        let start = until(&mut p0, MessageKind::SessionStart).await;
        let state = start.state.expect("game state after start");
        assert_eq!(state.hand.len(), crate::HAND);
        assert_eq!(state.opponent_hand_size, crate::HAND);
        assert_eq!(state.troop_deck_size, 46);
        assert!(state.active_player < crate::SEATS);
        assert_eq!(start.session.status, Status::InProgress);
        session.close(0).unwrap();
        let rest = drain(&mut p0).await;
        assert!(rest.iter().all(|m| m.kind != MessageKind::SessionStart));
        let starts = drain(&mut p1)
            .await
            .iter()
            .filter(|m| m.kind == MessageKind::SessionStart)
            .count();
        assert_eq!(starts, 1);
    }

    #[tokio::test]
    async fn empty_chat_is_rejected() {
        let (session, _) = Session::new(8, None);
        let mut p0 = session.connect(0).await.unwrap();
        session.submit_chat(0, "   ").unwrap();
        let error = until(&mut p0, MessageKind::Error).await;
        assert_eq!(error.error.map(|e| e.code), Some("emptyChat"));
        assert!(session.snapshot().await.chat.is_empty());
        session.submit_chat(0, "hello").unwrap();
        let chat = until(&mut p0, MessageKind::ClientChat).await;
        assert_eq!(chat.session.chat.len(), 1);
        assert_eq!(chat.session.chat[0].content, "hello");
    }

    #[tokio::test]
    async fn move_before_start_is_rejected() {
        let (session, _) = Session::new(8, None);
        let mut p0 = session.connect(0).await.unwrap();
        session.submit_move(0, Move::Draw).unwrap();
        let error = until(&mut p0, MessageKind::Error).await;
        assert_eq!(error.error.map(|e| e.code), Some("notStarted"));
        assert!(error.state.is_none());
    }

    #[tokio::test]
    async fn closed_session_refuses_everything() {
        let (session, _) = Session::new(8, None);
        let mut p0 = session.connect(0).await.unwrap();
        session.close(0).unwrap();
        let end = until(&mut p0, MessageKind::SessionEnd).await;
        assert_eq!(end.session.status, Status::Ended);
        assert_eq!(session.status().await, Status::Ended);
        assert!(p0.outbox.recv().await.is_none());
        let snapshot = session.snapshot().await;
        assert!(snapshot.clients[0].as_ref().is_some_and(|c| !c.connected));
        assert_eq!(session.set_ready(0, true), Err(SessionError::Closed));
        assert_eq!(session.add_client(None).await, Err(SessionError::SessionFull));
        assert!(matches!(session.connect(0).await, Err(SessionError::Closed)));
    }

    #[tokio::test]
    async fn saturated_queue_reports_busy() {
        let (session, _) = Session::new(1, None);
        session.set_ready(0, true).unwrap();
        assert_eq!(session.set_ready(0, false), Err(SessionError::Busy));
    }

    #[tokio::test]
    async fn reconnect_supersedes_previous_connection() {
        let (session, _) = Session::new(8, None);
        let first = session.connect(0).await.unwrap();
        let mut second = session.connect(0).await.unwrap();
        assert!(second.number > first.number);
        session.disconnect(0, first.number).await;
        let snapshot = session.snapshot().await;
        assert!(snapshot.clients[0].as_ref().is_some_and(|c| c.connected));
        session.submit_chat(0, "still here").unwrap();
        until(&mut second, MessageKind::ClientChat).await;
    }

    #[tokio::test]
    async fn connect_waits_out_a_full_queue() {
        let (session, _) = Session::new(4, None);
        session.add_client(None).await.unwrap();
        let mut p0 = session.connect(0).await.unwrap();
        session.set_ready(0, true).unwrap();
        session.set_ready(1, true).unwrap();
        until(&mut p0, MessageKind::ClientReady).await;
        until(&mut p0, MessageKind::ClientReady).await;
        for _ in 0..4 {
            session.submit_chat(0, "filler").unwrap();
        }
        assert_eq!(session.submit_chat(0, "one too many"), Err(SessionError::Busy));
        let mut p1 = session.connect(1).await.unwrap();
        let start = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            until(&mut p1, MessageKind::SessionStart),
        )
        .await
        .expect("connection event lost to a full queue");
        assert_eq!(start.session.status, Status::InProgress);
        assert_eq!(session.status().await, Status::InProgress);
    }
}
