//! Notification services: the durable tier and the ephemeral ledgers.

pub mod ledger;
pub mod service;

pub use ledger::NotificationLedger;
pub use service::NotificationService;
