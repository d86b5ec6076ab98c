use crate::Seat;
use crate::gameroom::*;
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

/// Pumps one websocket connection into and out of a session.
///
/// The read duty decodes frames and feeds the session's inbound queue;
/// the write duty drains this connection's outbound queue to the socket.
/// Either side ending cancels the other. The session itself lives on.
#[derive(Clone)]
pub struct Bridge {
    session: Session,
    seat: Seat,
    number: u64,
    token: CancellationToken,
}

impl Bridge {
    /// Attaches to the session and spawns both duties.
    pub async fn spawn(
        session: Session,
        seat: Seat,
        socket: actix_ws::Session,
        stream: actix_ws::MessageStream,
    ) -> Result<(), SessionError> {
        let connection = session.connect(seat).await?;
        let bridge = Self {
            session,
            seat,
            number: connection.number,
            token: CancellationToken::new(),
        };
        log::info!("{} opened", bridge);
        actix_web::rt::spawn(bridge.clone().write(socket.clone(), connection.outbox));
        actix_web::rt::spawn(bridge.read(socket, stream));
        Ok(())
    }
}

impl Bridge {
    async fn write(self, mut socket: actix_ws::Session, mut outbox: UnboundedReceiver<SessionMessage>) {
        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break,
                message = outbox.recv() => match message {
                    None => break,
                    Some(message) => match serde_json::to_string(&message) {
                        Err(e) => log::error!("{} failed to encode {:?}: {}", self, message.kind, e),
                        Ok(json) => if socket.text(json).await.is_err() {
                            log::warn!("{} socket closed while writing", self);
                            break;
                        },
                    },
                },
            }
        }
        self.token.cancel();
    }

    async fn read(self, mut socket: actix_ws::Session, mut stream: actix_ws::MessageStream) {
        'sesh: loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => break 'sesh,
                frame = stream.next() => match frame {
                    Some(Ok(actix_ws::Message::Text(text))) => self.forward(&text).await,
                    Some(Ok(actix_ws::Message::Ping(bytes))) => if socket.pong(&bytes).await.is_err() { break 'sesh },
                    Some(Ok(actix_ws::Message::Close(reason))) => {
                        log::debug!("{} close frame {:?}", self, reason);
                        break 'sesh;
                    }
                    Some(Err(e)) => {
                        log::error!("{} transport error: {}", self, e);
                        break 'sesh;
                    }
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        self.token.cancel();
        self.session.disconnect(self.seat, self.number).await;
        let _ = socket.close(None).await;
        log::info!("{} closed", self);
    }

    /// Decode failures and a full queue are answered here, never forwarded.
    async fn forward(&self, text: &str) {
        if let Err(e) = ClientMessage::try_from(text).and_then(|m| self.session.submit(self.seat, m)) {
            self.session.reject(self.seat, &e).await;
        }
    }
}

impl std::fmt::Display for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[bridge {}/P{}#{}]", self.session.id(), self.seat, self.number)
    }
}
