//! Reverse index from connection to subscribed channels.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

/// Tracks which channels each connection is subscribed to.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    /// Connection ID → channel names.
    subscriptions: DashMap<ConnectionId, Vec<String>>,
}

impl SubscriptionTracker {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a subscription.
    pub fn add(&self, conn_id: ConnectionId, channel_name: String) {
        let mut entry = self.subscriptions.entry(conn_id).or_default();
        if !entry.contains(&channel_name) {
            entry.push(channel_name);
        }
    }

    /// Removes a subscription.
    pub fn remove(&self, conn_id: ConnectionId, channel_name: &str) {
        if let Some(mut entry) = self.subscriptions.get_mut(&conn_id) {
            entry.retain(|c| c != channel_name);
        }
    }

    /// Removes all subscriptions for a connection, returning the channel names.
    pub fn remove_all(&self, conn_id: ConnectionId) -> Vec<String> {
        self.subscriptions
            .remove(&conn_id)
            .map(|(_, channels)| channels)
            .unwrap_or_default()
    }

    /// Returns the subscription count for a connection.
    pub fn count(&self, conn_id: ConnectionId) -> usize {
        self.subscriptions
            .get(&conn_id)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }
}
