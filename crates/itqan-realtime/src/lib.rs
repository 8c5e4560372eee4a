//! # itqan-realtime
//!
//! The real-time hint layer for ITQAN. A named broadcast topic
//! (`enrollment-updates`) carries enrollment grant/revoke hints to
//! subscribed WebSocket clients. The channel is purely a low-latency
//! optimization: delivery is best-effort and at-most-once per subscriber
//! session, and the enrollments table remains the only source of truth.
//! Clients that miss an event re-derive access on their next full load;
//! the [`reconcile::AccessReconciler`] encodes the client-side rules.

pub mod channel;
pub mod connection;
pub mod engine;
pub mod hint;
pub mod message;
pub mod reconcile;

pub use engine::RealtimeEngine;
pub use hint::{ENROLLMENT_UPDATES_CHANNEL, HintPublisher};
pub use reconcile::AccessReconciler;
