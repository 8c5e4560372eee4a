//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use itqan_core::config::realtime::RealtimeConfig;
use itqan_core::error::AppError;

use crate::channel::registry::ChannelRegistry;
use crate::connection::manager::ConnectionManager;
use crate::hint::HintPublisher;

/// Central real-time engine coordinating connections, channels, and
/// hint publishing.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Channel registry.
    pub channels: Arc<ChannelRegistry>,
    /// Enrollment hint publisher.
    pub hints: HintPublisher,
    /// Realtime configuration.
    config: RealtimeConfig,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let channels = Arc::new(ChannelRegistry::new());
        let connections = Arc::new(ConnectionManager::new(config.clone(), channels.clone()));
        let hints = HintPublisher::new(connections.clone(), &config);

        info!("Real-time engine initialized");

        Self {
            connections,
            channels,
            hints,
            config,
            shutdown_tx,
        }
    }

    /// The configured WebSocket ping interval.
    pub fn ping_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.config.ping_interval_seconds)
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Initiates a graceful shutdown of the real-time engine.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        info!("Shutting down real-time engine");

        let _ = self.shutdown_tx.send(());
        self.connections.close_all();

        info!("Real-time engine shut down");
        Ok(())
    }
}
