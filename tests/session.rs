#![cfg(feature = "server")]

use battleline::gameplay::*;
use battleline::gameroom::*;
use battleline::hosting::Registry;

async fn until(connection: &mut Connection, kind: MessageKind) -> SessionMessage {
    loop {
        let message = connection.outbox.recv().await.expect("session hung up");
        if message.kind == kind {
            return message;
        }
    }
}

#[tokio::test]
async fn full_match_lifecycle() {
    let registry = Registry::new(16);
    let (session, host) = registry.create(Some("Alexander")).await;
    let session = registry.get(session.id()).await.unwrap();
    assert_eq!(session.status().await, Status::Created);

    let guest = session.add_client(Some("Darius")).await.unwrap();
    assert_eq!(session.add_client(None).await.map(|c| c.seat), Err(SessionError::SessionFull));
    let seat0 = session.authenticate(host.client, &host.key).await.unwrap();
    let seat1 = session.authenticate(guest.client, &guest.key).await.unwrap();
    assert_eq!((seat0, seat1), (0, 1));

    let mut p0 = session.connect(seat0).await.unwrap();
    let mut p1 = session.connect(seat1).await.unwrap();
    assert_eq!(session.status().await, Status::Ready);

    let (a, b) = tokio::join!(async { session.set_ready(0, true) }, async {
        session.set_ready(1, true)
    });
    a.unwrap();
    b.unwrap();
    let start = until(&mut p0, MessageKind::SessionStart).await;
    until(&mut p1, MessageKind::SessionStart).await;
    let state = start.state.expect("state once started");
    assert_eq!(state.troop_deck_size, 46);
    assert_eq!(session.status().await, Status::InProgress);

    // the waiting player is refused and sees nothing change
    let active = state.active_player;
    let waiting = 1 - active;
    let (mover, other) = match active {
        0 => (&mut p0, &mut p1),
        _ => (&mut p1, &mut p0),
    };
    session.submit_move(waiting, Move::Draw).unwrap();
    let refused = until(other, MessageKind::Error).await;
    assert_eq!(refused.error.map(|e| e.code), Some("invalidMove"));

    // one opening card can never complete a side, so claim is skipped
    let card = state.hand.cards()[0];
    session.submit_move(active, Move::Place(card, 4)).unwrap();
    let placed = until(mover, MessageKind::ClientMove).await;
    let view = placed.state.expect("state after move");
    assert_eq!(view.turn_phase, Phase::Draw);
    assert_eq!(view.lanes[4].side(active).cards(), &[card]);
    assert_eq!(view.hand.len(), 6);

    session.submit_move(active, Move::Draw).unwrap();
    let drawn = until(mover, MessageKind::ClientMove).await;
    let view = drawn.state.expect("state after draw");
    assert_eq!(view.active_player, waiting);
    assert_eq!(view.turn_phase, Phase::Placement);
    assert_eq!(view.hand.len(), 7);
    assert_eq!(view.troop_deck_size, 45);

    let seen = until(other, MessageKind::ClientMove).await;
    let seen = seen.state.expect("opponent state");
    assert_eq!(seen.opponent_hand_size, 6);
    assert_eq!(seen.lanes[4].side(active).cards(), &[card]);

    session.submit_chat(waiting, "your move was noted").unwrap();
    let chat = until(mover, MessageKind::ClientChat).await;
    assert_eq!(chat.session.chat.len(), 1);

    session.close(waiting).unwrap();
    let end = until(mover, MessageKind::SessionEnd).await;
    assert_eq!(end.session.status, Status::Ended);
    assert_eq!(session.submit_chat(active, "hello?"), Err(SessionError::Closed));
}

#[tokio::test]
async fn reconnect_keeps_the_match() {
    let registry = Registry::new(16);
    let (session, _) = registry.create(None).await;
    session.add_client(None).await.unwrap();
    let first = session.connect(0).await.unwrap();
    let mut p1 = session.connect(1).await.unwrap();
    session.disconnect(0, first.number).await;
    let sync = until(&mut p1, MessageKind::Sync).await;
    let mut again = session.connect(0).await.unwrap();
    assert!(again.number > first.number);
    session.set_ready(0, true).unwrap();
    session.set_ready(1, true).unwrap();
    until(&mut again, MessageKind::SessionStart).await;
    assert!(sync.session.clients[1].as_ref().is_some_and(|c| c.connected));
}
