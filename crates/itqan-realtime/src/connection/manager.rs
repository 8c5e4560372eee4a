//! Connection manager — registers connections and routes messages.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use itqan_core::config::realtime::RealtimeConfig;
use itqan_entity::user::UserRole;

use crate::channel::registry::ChannelRegistry;
use crate::message::types::{InboundMessage, OutboundMessage};

use super::handle::{ConnectionHandle, ConnectionId};

/// Manages the set of live WebSocket connections.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Realtime configuration.
    config: RealtimeConfig,
    /// Connection ID → handle.
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Channel registry shared with the hint publisher.
    channels: Arc<ChannelRegistry>,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, channels: Arc<ChannelRegistry>) -> Self {
        Self {
            config,
            connections: DashMap::new(),
            channels,
        }
    }

    /// Registers a new connection and returns its handle plus the
    /// receiver side of its outbound message buffer.
    pub fn register(
        &self,
        user_id: Uuid,
        user_role: UserRole,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, user_role, tx));
        self.connections.insert(handle.id, Arc::clone(&handle));

        debug!(conn_id = %handle.id, user_id = %user_id, "Connection registered");
        (handle, rx)
    }

    /// Unregisters a connection and drops all its subscriptions.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some((_, handle)) = self.connections.remove(conn_id) {
            handle.mark_closed();
        }
        self.channels.unsubscribe_all(*conn_id);
        debug!(conn_id = %conn_id, "Connection unregistered");
    }

    /// Handles a raw inbound text frame from a connection.
    pub fn handle_inbound(&self, conn_id: &ConnectionId, text: &str) {
        let Some(handle) = self.connections.get(conn_id).map(|h| Arc::clone(&h)) else {
            return;
        };

        match serde_json::from_str::<InboundMessage>(text) {
            Ok(InboundMessage::Subscribe { channel }) => {
                if self.channels.subscription_count(*conn_id)
                    >= self.config.max_subscriptions_per_connection
                {
                    handle.send(OutboundMessage::Error {
                        code: "SUBSCRIPTION_LIMIT".to_string(),
                        message: "Too many channel subscriptions".to_string(),
                    });
                    return;
                }
                self.channels.subscribe(channel.clone(), *conn_id);
                handle.send(OutboundMessage::Subscribed { channel });
            }
            Ok(InboundMessage::Unsubscribe { channel }) => {
                self.channels.unsubscribe(channel.clone(), *conn_id);
                handle.send(OutboundMessage::Unsubscribed { channel });
            }
            Ok(InboundMessage::Pong { .. }) => {
                // Keepalive only; nothing to track beyond liveness.
            }
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "Malformed inbound message");
                handle.send(OutboundMessage::Error {
                    code: "MALFORMED".to_string(),
                    message: "Could not parse message".to_string(),
                });
            }
        }
    }

    /// Sends a message to every subscriber of a channel.
    ///
    /// Returns the number of connections the message was handed to.
    /// Failed or full connections are skipped, never retried.
    pub fn send_to_channel(&self, channel: &str, msg: &OutboundMessage) -> usize {
        let mut delivered = 0;
        for conn_id in self.channels.get_subscribers(channel) {
            if let Some(handle) = self.connections.get(&conn_id) {
                if handle.send(msg.clone()) {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Sends a message to every live connection owned by a user.
    pub fn send_to_user(&self, user_id: Uuid, msg: &OutboundMessage) -> usize {
        let mut delivered = 0;
        for entry in self.connections.iter() {
            if entry.user_id == user_id && entry.send(msg.clone()) {
                delivered += 1;
            }
        }
        delivered
    }

    /// Whether a user has at least one live connection.
    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.connections
            .iter()
            .any(|entry| entry.user_id == user_id && entry.is_alive())
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Closes all connections (used during shutdown).
    pub fn close_all(&self) {
        for entry in self.connections.iter() {
            entry.mark_closed();
        }
        self.connections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itqan_core::events::EnrollmentEvent;

    fn make_manager() -> (Arc<ChannelRegistry>, ConnectionManager) {
        let channels = Arc::new(ChannelRegistry::new());
        let manager = ConnectionManager::new(RealtimeConfig::default(), Arc::clone(&channels));
        (channels, manager)
    }

    #[tokio::test]
    async fn test_subscribe_and_deliver() {
        let (_channels, manager) = make_manager();
        let user = Uuid::new_v4();
        let (handle, mut rx) = manager.register(user, UserRole::Student);

        manager.handle_inbound(
            &handle.id,
            r#"{"type":"subscribe","channel":"enrollment-updates"}"#,
        );
        assert!(matches!(
            rx.recv().await,
            Some(OutboundMessage::Subscribed { .. })
        ));

        let msg = OutboundMessage::EnrollmentUpdate {
            channel: "enrollment-updates".to_string(),
            event: EnrollmentEvent::EnrollmentApproved {
                user_id: user,
                course_id: Uuid::new_v4(),
                course_name: "UI/UX Principles".to_string(),
                timestamp: chrono::Utc::now(),
            },
        };
        assert_eq!(manager.send_to_channel("enrollment-updates", &msg), 1);
        assert!(matches!(
            rx.recv().await,
            Some(OutboundMessage::EnrollmentUpdate { .. })
        ));
    }

    #[tokio::test]
    async fn test_unregister_drops_subscriptions() {
        let (channels, manager) = make_manager();
        let (handle, _rx) = manager.register(Uuid::new_v4(), UserRole::Student);

        manager.handle_inbound(
            &handle.id,
            r#"{"type":"subscribe","channel":"enrollment-updates"}"#,
        );
        assert_eq!(channels.channel_subscriber_count("enrollment-updates"), 1);

        manager.unregister(&handle.id);
        assert_eq!(channels.channel_subscriber_count("enrollment-updates"), 0);
        assert!(!manager.is_online(handle.user_id));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_delivers_nothing() {
        let (_channels, manager) = make_manager();
        let msg = OutboundMessage::Ping { timestamp: 0 };
        assert_eq!(manager.send_to_channel("enrollment-updates", &msg), 0);
    }
}
