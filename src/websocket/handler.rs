use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};

use crate::{
    websocket::messages::{ServerMessage, SubscribeRequest},
    AppState,
};

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("New event subscription connection");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Serialize and send one message. Returns false once the socket is unusable.
async fn send_message(sender: &mut SplitSink<WebSocket, Message>, msg: &ServerMessage) -> bool {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize message: {}", e);
            true
        }
    }
}

/// Wait for the client's subscribe request
async fn read_subscription(receiver: &mut SplitStream<WebSocket>) -> Result<String, String> {
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                return serde_json::from_str::<SubscribeRequest>(&text)
                    .map(|request| request.player_session_id)
                    .map_err(|e| format!("Invalid subscribe message: {}", e));
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    Err("Connection closed before subscribing".to_string())
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let subscription = read_subscription(&mut receiver).await.and_then(|id| {
        state
            .service
            .subscribe(&id)
            .map(|rx| (id, rx))
            .map_err(|e| e.to_string())
    });
    let (player_session_id, mut rx) = match subscription {
        Ok(subscription) => subscription,
        Err(message) => {
            tracing::warn!("Subscription refused: {}", message);
            send_message(&mut sender, &ServerMessage::Error { message }).await;
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };

    tracing::info!("Player session {} subscribed", player_session_id);
    if !send_message(
        &mut sender,
        &ServerMessage::Subscribed {
            player_session_id: player_session_id.clone(),
        },
    )
    .await
    {
        drop(rx);
        state.service.notifier().unsubscribe(&player_session_id);
        return;
    }

    // Forward game events to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            tracing::debug!("Delivering {:?}", event);
            if !send_message(&mut sender, &ServerMessage::GameEvent { event }).await {
                break;
            }
        }
    });

    // Only watch for the client going away
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    // The receiver is dropped only once the forwarding task has fully stopped
    let _ = send_task.await;

    state.service.notifier().unsubscribe(&player_session_id);

    tracing::info!(
        "Event subscription closed for player session {}",
        player_session_id
    );
}
