//! Inbound and outbound WebSocket message type definitions.

use serde::{Deserialize, Serialize};

use itqan_core::events::EnrollmentEvent;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Subscribe to a channel.
    Subscribe {
        /// Channel name.
        channel: String,
    },
    /// Unsubscribe from a channel.
    Unsubscribe {
        /// Channel name.
        channel: String,
    },
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Subscription confirmed (the bounded handshake).
    Subscribed {
        /// Channel name.
        channel: String,
    },
    /// Unsubscription confirmed.
    Unsubscribed {
        /// Channel name.
        channel: String,
    },
    /// An enrollment hint carried on the `enrollment-updates` channel.
    EnrollmentUpdate {
        /// The channel the event was published on.
        channel: String,
        /// The hint payload.
        event: EnrollmentEvent,
    },
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

impl OutboundMessage {
    /// Serialize to the JSON wire format.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"error","code":"SERIALIZE","message":"failed to serialize message"}"#
                .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_inbound_subscribe_wire_format() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"subscribe","channel":"enrollment-updates"}"#)
                .expect("deserialize");
        assert!(matches!(msg, InboundMessage::Subscribe { channel } if channel == "enrollment-updates"));
    }

    #[test]
    fn test_enrollment_update_wire_format() {
        let msg = OutboundMessage::EnrollmentUpdate {
            channel: "enrollment-updates".to_string(),
            event: EnrollmentEvent::EnrollmentApproved {
                user_id: Uuid::new_v4(),
                course_id: Uuid::new_v4(),
                course_name: "FullStack Mastery".to_string(),
                timestamp: Utc::now(),
            },
        };
        let json: serde_json::Value = serde_json::from_str(&msg.to_json()).unwrap();
        assert_eq!(json["type"], "enrollment_update");
        assert_eq!(json["event"]["type"], "enrollment-approved");
        assert_eq!(json["event"]["course_name"], "FullStack Mastery");
    }
}
