use std::collections::{HashMap, HashSet};

use serde_json::{json, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// In-process publish/subscribe hub for game rooms.
///
/// A transport (the WebSocket route) registers each connection and owns
/// the receiving half of its outbound channel; the service keeps the
/// sending half plus the room membership table. Membership is transient:
/// nothing survives a restart, clients re-subscribe after reconnecting.
///
/// Delivery is best effort. A send to a closed connection is dropped and
/// logged; within one room, events arrive in the order they were
/// published.
pub struct RealtimeService {
    connections: RwLock<HashMap<String, UnboundedSender<String>>>,
    rooms: RwLock<HashMap<String, HashSet<String>>>,
}

impl RealtimeService {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate a connection id and the outbound message stream for it.
    pub async fn register(&self) -> (String, UnboundedReceiver<String>) {
        let connection_id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections
            .write()
            .await
            .insert(connection_id.clone(), tx);
        info!("Registered realtime connection {}", connection_id);
        (connection_id, rx)
    }

    /// Drop a connection and remove it from every room it joined.
    pub async fn unregister(&self, connection_id: &str) {
        self.connections.write().await.remove(connection_id);
        let mut rooms = self.rooms.write().await;
        for members in rooms.values_mut() {
            members.remove(connection_id);
        }
        rooms.retain(|_, members| !members.is_empty());
        info!("Unregistered realtime connection {}", connection_id);
    }

    /// Add a connection to a game's room. Idempotent; a connection may
    /// belong to any number of rooms.
    pub async fn subscribe(&self, connection_id: &str, game_id: &str) {
        let newly_added = self
            .rooms
            .write()
            .await
            .entry(game_id.to_string())
            .or_default()
            .insert(connection_id.to_string());
        if newly_added {
            info!("Connection {} subscribed to game {}", connection_id, game_id);
        }
    }

    /// Deliver an event to every current member of a game's room.
    pub async fn broadcast(&self, game_id: &str, event: &str, data: Value) {
        let envelope = json!({ "event": event, "data": data }).to_string();

        let rooms = self.rooms.read().await;
        let Some(members) = rooms.get(game_id) else {
            return;
        };

        let connections = self.connections.read().await;
        for connection_id in members {
            if let Some(sender) = connections.get(connection_id) {
                if sender.send(envelope.clone()).is_err() {
                    debug!("Dropping {} event for closed connection {}", event, connection_id);
                }
            }
        }
    }

    /// Deliver an event to a single connection (pong and error replies).
    pub async fn send(&self, connection_id: &str, event: &str, data: Value) {
        let envelope = json!({ "event": event, "data": data }).to_string();

        let connections = self.connections.read().await;
        match connections.get(connection_id) {
            Some(sender) => {
                if sender.send(envelope).is_err() {
                    debug!("Dropping {} event for closed connection {}", event, connection_id);
                }
            }
            None => {
                debug!("Connection {} is not registered, skipping {}", connection_id, event);
            }
        }
    }
}

impl Default for RealtimeService {
    fn default() -> Self {
        Self::new()
    }
}
