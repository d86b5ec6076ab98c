use super::*;
use crate::ID;
use crate::Seat;
use crate::gameplay::*;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::Receiver;

/// Events the loop consumes, one at a time.
#[derive(Debug)]
pub enum Inbound {
    Message(Seat, ClientMessage),
    Connected(Seat),
    Disconnected(Seat),
}

/// Serialized coordinator for one match.
///
/// Sole consumer of the session's inbound queue and sole owner of the
/// game. Every move, phase transition and claim evaluation happens here,
/// one event after another, however many connections are feeding the queue.
///
/// The game is absent until both players are connected and ready, and is
/// created exactly once at that instant.
#[derive(Debug)]
pub struct Room {
    id: ID<Session>,
    table: Arc<Mutex<Table>>,
    inbox: Receiver<Inbound>,
    game: Option<Game>,
}

enum Flow {
    Continue,
    Stop,
}

impl Room {
    pub fn new(id: ID<Session>, table: Arc<Mutex<Table>>, inbox: Receiver<Inbound>) -> Self {
        Self {
            id,
            table,
            inbox,
            game: None,
        }
    }

    pub async fn run(mut self) {
        log::info!("[room {}] loop started", self.id);
        while let Some(inbound) = self.inbox.recv().await {
            log::debug!("[room {}] {:?}", self.id, inbound);
            if let Flow::Stop = self.handle(inbound).await {
                break;
            }
        }
        self.inbox.close();
        self.end().await;
        log::info!("[room {}] loop finished", self.id);
    }
}

impl Room {
    async fn handle(&mut self, inbound: Inbound) -> Flow {
        match inbound {
            Inbound::Connected(seat) => {
                log::info!("[room {}] P{} connected", self.id, seat);
                self.sync().await;
                self.start().await;
                Flow::Continue
            }
            Inbound::Disconnected(seat) => {
                log::info!("[room {}] P{} disconnected", self.id, seat);
                self.sync().await;
                Flow::Continue
            }
            Inbound::Message(seat, message) => match Command::try_from(message) {
                Ok(Command::Close) => {
                    log::info!("[room {}] P{} closed the session", self.id, seat);
                    Flow::Stop
                }
                Ok(command) => {
                    if let Err(e) = self.command(seat, command).await {
                        self.reject(seat, &e).await;
                    }
                    Flow::Continue
                }
                Err(e) => {
                    self.reject(seat, &e).await;
                    Flow::Continue
                }
            },
        }
    }

    async fn command(&mut self, seat: Seat, command: Command) -> Result<(), SessionError> {
        match command {
            Command::Ready(ready) => self.ready(seat, ready).await,
            Command::Move(m) => self.play(seat, m).await,
            Command::Chat(text) => self.chat(seat, &text).await,
            Command::Close => Ok(()),
        }
    }

    async fn ready(&mut self, seat: Seat, ready: bool) -> Result<(), SessionError> {
        self.table.lock().await.set_ready(seat, ready)?;
        match self.start().await {
            true => Ok(()),
            false => {
                let kind = match ready {
                    true => MessageKind::ClientReady,
                    false => MessageKind::ClientUnready,
                };
                self.table.lock().await.broadcast(kind, self.game.as_ref());
                Ok(())
            }
        }
    }

    async fn play(&mut self, seat: Seat, m: Move) -> Result<(), SessionError> {
        let game = self.game.as_mut().ok_or(SessionError::NotStarted)?;
        game.apply(seat, m)?;
        log::debug!("[room {}] P{} {}", self.id, seat, m);
        self.table
            .lock()
            .await
            .broadcast(MessageKind::ClientMove, self.game.as_ref());
        Ok(())
    }

    async fn chat(&mut self, seat: Seat, text: &str) -> Result<(), SessionError> {
        let mut table = self.table.lock().await;
        table.say(seat, text)?;
        table.broadcast(MessageKind::ClientChat, self.game.as_ref());
        Ok(())
    }

    /// Deals the match if the start condition holds and it has not been dealt.
    async fn start(&mut self) -> bool {
        let mut table = self.table.lock().await;
        if self.game.is_some() || !table.launch() {
            return false;
        }
        let game = Game::root();
        log::info!("[room {}] match started, P{} moves first", self.id, game.active());
        self.game = Some(game);
        table.broadcast(MessageKind::SessionStart, self.game.as_ref());
        true
    }

    async fn sync(&self) {
        self.table
            .lock()
            .await
            .broadcast(MessageKind::Sync, self.game.as_ref());
    }

    async fn reject(&self, seat: Seat, error: &SessionError) {
        self.table.lock().await.reject(seat, error, self.game.as_ref());
    }

    async fn end(&mut self) {
        let mut table = self.table.lock().await;
        table.advance(Status::Ended);
        table.broadcast(MessageKind::SessionEnd, self.game.as_ref());
        table.release();
    }
}
