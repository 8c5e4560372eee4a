//! Best-effort hint publishing for enrollment changes.
//!
//! Every access-changing operation durably mutates the enrollments table
//! first; the hint published here only shortens the latency with which
//! other clients observe the change. A publish that reaches no
//! subscriber is normal and correct — offline clients re-derive access
//! from the table on their next full load.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use itqan_core::config::realtime::RealtimeConfig;
use itqan_core::events::EnrollmentEvent;

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;

/// The broadcast topic carrying enrollment grant/revoke hints.
pub const ENROLLMENT_UPDATES_CHANNEL: &str = "enrollment-updates";

/// Publishes enrollment hints onto the shared broadcast topic.
#[derive(Debug, Clone)]
pub struct HintPublisher {
    /// Connection manager used for delivery.
    connections: Arc<ConnectionManager>,
    /// Bound on how long a detached publish may run before teardown.
    linger: Duration,
}

impl HintPublisher {
    /// Creates a new hint publisher.
    pub fn new(connections: Arc<ConnectionManager>, config: &RealtimeConfig) -> Self {
        Self {
            connections,
            linger: Duration::from_secs(config.publisher_linger_seconds),
        }
    }

    /// Publishes a hint to all current subscribers.
    ///
    /// Returns the number of connections the hint was handed to. Never
    /// fails: delivery problems are logged and absorbed here.
    pub fn publish(&self, event: EnrollmentEvent) -> usize {
        let msg = OutboundMessage::EnrollmentUpdate {
            channel: ENROLLMENT_UPDATES_CHANNEL.to_string(),
            event,
        };
        let delivered = self.connections.send_to_channel(ENROLLMENT_UPDATES_CHANNEL, &msg);
        debug!(delivered, channel = ENROLLMENT_UPDATES_CHANNEL, "Hint published");
        delivered
    }

    /// Publishes a hint from a spawned task, torn down after the
    /// configured linger rather than held open indefinitely.
    ///
    /// This is the form the approval workflow uses: the caller never
    /// waits on subscriber delivery, and a publish that has not finished
    /// within the linger bound is abandoned.
    pub fn publish_detached(&self, event: EnrollmentEvent) {
        let publisher = self.clone();
        let linger = self.linger;
        tokio::spawn(async move {
            let result = tokio::time::timeout(linger, async move {
                publisher.publish(event)
            })
            .await;
            if result.is_err() {
                warn!(
                    channel = ENROLLMENT_UPDATES_CHANNEL,
                    "Hint publish abandoned after linger timeout"
                );
            }
        });
    }
}

impl itqan_core::traits::HintSink for HintPublisher {
    fn publish_hint(&self, event: EnrollmentEvent) {
        self.publish_detached(event);
    }
}
