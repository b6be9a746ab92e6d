use std::{sync::Arc, time::Duration};

use futures::{SinkExt, Stream, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::{connect_async, tungstenite};
use ttt_game_service::{app, config::Config, models::Symbol, AppState};

use tungstenite::Message;

async fn spawn_server() -> (String, Arc<AppState>) {
    let state = Arc::new(AppState::from_config(Config::in_memory()).await.unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("ws://{}/ws", addr), state)
}

async fn next_json<S>(ws: &mut S) -> Value
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    loop {
        match ws.next().await.expect("socket closed").expect("socket error") {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            _ => continue,
        }
    }
}

/// Register, log in, and join `game_id` as `symbol`; returns the player session id
async fn join(state: &AppState, name: &str, game_id: &str, symbol: Symbol) -> String {
    let service = &state.service;
    service.register_user(name, "pw").await.unwrap();
    let session = service.login(name, "pw").await.unwrap();
    service
        .join_game(session.user_id.clone(), game_id, symbol, None)
        .unwrap()
        .id
        .clone()
}

#[tokio::test]
async fn test_both_players_receive_every_event() {
    let (url, state) = spawn_server().await;
    state.service.create_game("g1").unwrap();
    let x = join(&state, "alice", "g1", Symbol::X).await;
    let o = join(&state, "bob", "g1", Symbol::O).await;

    let mut sockets = Vec::new();
    for id in [&x, &o] {
        let (mut ws, _) = connect_async(url.as_str()).await.unwrap();
        ws.send(Message::Text(json!({ "playerSessionId": id }).to_string().into()))
            .await
            .unwrap();
        let reply = next_json(&mut ws).await;
        assert_eq!(reply["type"], "subscribed");
        assert_eq!(reply["playerSessionId"], id.as_str());
        sockets.push(ws);
    }

    for (id, cx, cy) in [(&x, 0, 0), (&o, 1, 1), (&x, 1, 0), (&o, 2, 2), (&x, 2, 0)] {
        state.service.make_move(id, cx, cy).unwrap();
    }

    for ws in sockets.iter_mut() {
        let mut events = Vec::new();
        for _ in 0..6 {
            let message = next_json(ws).await;
            assert_eq!(message["type"], "game_event");
            events.push(message["event"].clone());
        }
        let kinds: Vec<_> = events
            .iter()
            .map(|e| e["event"].as_str().unwrap())
            .collect();
        let mut expected = vec!["move-made"; 5];
        expected.push("game-won");
        assert_eq!(kinds, expected);
        assert_eq!(events[1]["symbol"], "O");
        assert_eq!(events[5]["symbol"], "X");
    }
}

#[tokio::test]
async fn test_unknown_player_session_is_refused() {
    let (url, _state) = spawn_server().await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();
    ws.send(Message::Text(json!({ "playerSessionId": "nope" }).to_string().into()))
        .await
        .unwrap();

    let reply = next_json(&mut ws).await;
    assert_eq!(reply["type"], "error");
}

#[tokio::test]
async fn test_subscription_is_released_when_socket_closes() {
    let (url, state) = spawn_server().await;
    state.service.create_game("g1").unwrap();
    let x = join(&state, "alice", "g1", Symbol::X).await;

    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();
    ws.send(Message::Text(json!({ "playerSessionId": x }).to_string().into()))
        .await
        .unwrap();
    assert_eq!(next_json(&mut ws).await["type"], "subscribed");
    assert!(state.service.notifier().is_subscribed(&x));

    ws.close(None).await.unwrap();
    drop(ws);

    let released = tokio::time::timeout(Duration::from_secs(5), async {
        while state.service.notifier().is_subscribed(&x) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(released.is_ok(), "subscriber should be removed after close");
}
