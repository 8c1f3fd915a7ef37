use axum::{
    extract::ws::{Message, WebSocket},
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket connection and run the room
/// subscription loop until the client goes away.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let (connection_id, mut outbound) = state.realtime_service.register().await;
    info!("WebSocket connection established: {}", connection_id);

    loop {
        tokio::select! {
            // Room events published by the game service.
            event = outbound.recv() => {
                match event {
                    Some(text) => {
                        if socket.send(Message::Text(text)).await.is_err() {
                            debug!("WebSocket client {} disconnected (send failed)", connection_id);
                            break;
                        }
                    }
                    None => break,
                }
            }
            // Messages from the client, or the end of the connection.
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_message(&state, &connection_id, &text).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {
                        // binary/ping/pong frames carry no actions
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error on {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        }
    }

    // Disconnect is an implicit unsubscribe from every room.
    state.realtime_service.unregister(&connection_id).await;
    info!("WebSocket connection disconnected: {}", connection_id);
}

async fn handle_client_message(state: &AppState, connection_id: &str, text: &str) {
    let message: Value = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            debug!("Failed to parse message from {}: {}", connection_id, e);
            state
                .realtime_service
                .send(connection_id, "error", json!({ "message": "Invalid JSON format" }))
                .await;
            return;
        }
    };

    match message.get("action").and_then(|a| a.as_str()) {
        Some("joinGame") => {
            if let Some(game_id) = message.get("gameId").and_then(|g| g.as_str()) {
                state.realtime_service.subscribe(connection_id, game_id).await;
                state
                    .realtime_service
                    .broadcast(
                        game_id,
                        "playerJoined",
                        json!({ "socketId": connection_id, "gameId": game_id }),
                    )
                    .await;
            }
        }
        Some("ping") => {
            state
                .realtime_service
                .send(
                    connection_id,
                    "pong",
                    json!({ "timestamp": chrono::Utc::now().to_rfc3339() }),
                )
                .await;
        }
        Some(action) => {
            debug!("Unknown action {} from {}", action, connection_id);
            state
                .realtime_service
                .send(connection_id, "error", json!({ "message": "Unknown action" }))
                .await;
        }
        None => {
            state
                .realtime_service
                .send(connection_id, "error", json!({ "message": "No action specified" }))
                .await;
        }
    }
}
