//! `GameServer`: the facade a transport embeds.
//!
//! A transport layer (WebSocket handler, test harness, anything that can
//! turn a connection into bytes plus an event channel) hands inbound
//! payloads to [`GameServer::handle_data`] and drains the per-connection
//! event receiver it registered at join time. Everything below this
//! point is the room and rules machinery.

use okeytable_protocol::{ClientAction, Codec, ConnId, JsonCodec, ServerEvent};
use okeytable_room::{EventSender, RoomConfig, RoomRegistry};
use tokio::sync::Mutex;

use crate::OkeytableError;

/// The table server. One instance per process.
///
/// Holds the room registry behind a `Mutex`; the lock is only taken to
/// look up or create a room handle, never while a game action runs. The
/// room actors themselves serialize all game state access.
pub struct GameServer {
    registry: Mutex<RoomRegistry>,
    codec: JsonCodec,
}

impl GameServer {
    /// A server with default room settings.
    pub fn new() -> Self {
        Self::with_config(RoomConfig::default())
    }

    /// A server whose rooms all use `config`.
    pub fn with_config(config: RoomConfig) -> Self {
        Self {
            registry: Mutex::new(RoomRegistry::with_config(config)),
            codec: JsonCodec,
        }
    }

    /// Handles one inbound payload from a connection.
    ///
    /// Payloads that fail to decode are logged at debug level and
    /// dropped; a client cannot crash or stall the server with garbage.
    pub async fn handle_data(&self, conn: ConnId, data: &[u8], sender: &EventSender) {
        let action: ClientAction = match self.codec.decode(data) {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(%conn, error = %e, "dropping undecodable payload");
                return;
            }
        };
        self.handle_action(conn, action, sender).await;
    }

    /// Handles one decoded action from a connection.
    ///
    /// Join is the only action that creates a room; everything else
    /// addresses a room that must already exist. Rejections (unknown
    /// room, seat taken, rule violations) are silent toward the client:
    /// the connection simply receives no event.
    pub async fn handle_action(&self, conn: ConnId, action: ClientAction, sender: &EventSender) {
        match action {
            ClientAction::Join { room, name } => {
                let handle = self.registry.lock().await.ensure_room(&room);
                if let Err(e) = handle.join(conn, name, sender.clone()).await {
                    tracing::debug!(%conn, room = %room, error = %e, "join rejected");
                }
            }
            other => {
                let Some(handle) = self.registry.lock().await.get(other.room()) else {
                    tracing::debug!(
                        %conn,
                        room = %other.room(),
                        "action for unknown room dropped"
                    );
                    return;
                };
                if let Err(e) = handle.action(conn, other).await {
                    tracing::debug!(%conn, error = %e, "room rejected action");
                }
            }
        }
    }

    /// Serializes an outbound event for the wire. The transport calls
    /// this on everything it drains from an event receiver.
    pub fn encode_event(&self, event: &ServerEvent) -> Result<Vec<u8>, OkeytableError> {
        Ok(self.codec.encode(event)?)
    }

    /// Number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.registry.lock().await.room_count()
    }

    /// Shuts down every room.
    pub async fn shutdown(&self) {
        self.registry.lock().await.shutdown_all().await;
    }
}

impl Default for GameServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okeytable_protocol::RoomKey;
    use tokio::sync::mpsc;

    fn payload(json: &str) -> Vec<u8> {
        json.as_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_dropped() {
        let server = GameServer::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        server.handle_data(ConnId(1), b"not json", &tx).await;
        server
            .handle_data(ConnId(1), br#"{"type": "teleport"}"#, &tx)
            .await;

        assert_eq!(server.room_count().await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_creates_the_room() {
        let server = GameServer::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        server
            .handle_data(
                ConnId(1),
                &payload(r#"{"type": "join", "room": "t1", "name": "ayse"}"#),
                &tx,
            )
            .await;

        assert_eq!(server.room_count().await, 1);
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ServerEvent::PlayerJoined { .. }));
    }

    #[tokio::test]
    async fn test_action_for_unknown_room_creates_nothing() {
        let server = GameServer::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        server
            .handle_data(ConnId(1), &payload(r#"{"type": "start", "room": "t1"}"#), &tx)
            .await;

        assert_eq!(server.room_count().await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_then_start_deals_a_hand() {
        let server = GameServer::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        server
            .handle_data(
                ConnId(1),
                &payload(r#"{"type": "join", "room": "t1", "name": "ayse"}"#),
                &tx,
            )
            .await;
        server
            .handle_data(ConnId(1), &payload(r#"{"type": "start", "room": "t1"}"#), &tx)
            .await;

        let hand_size = loop {
            match rx.recv().await.unwrap() {
                ServerEvent::GameStarted { own_hand, .. } => break own_hand.len(),
                _ => continue,
            }
        };
        assert_eq!(hand_size, 15);
    }

    #[tokio::test]
    async fn test_encode_event_is_tagged_json() {
        let server = GameServer::new();
        let bytes = server
            .encode_event(&ServerEvent::BotsAdded {
                names: vec!["Defne".into()],
            })
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["type"], "bots_added");
    }

    #[tokio::test]
    async fn test_handle_action_routes_by_room_key() {
        let server = GameServer::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        server
            .handle_action(
                ConnId(1),
                ClientAction::Join {
                    room: RoomKey::new("t1"),
                    name: "ayse".into(),
                },
                &tx,
            )
            .await;
        server
            .handle_action(
                ConnId(2),
                ClientAction::Join {
                    room: RoomKey::new("t2"),
                    name: "mehmet".into(),
                },
                &tx,
            )
            .await;

        assert_eq!(server.room_count().await, 2);
        server.shutdown().await;
        assert_eq!(server.room_count().await, 0);
    }
}
