//! Notification entities: the durable table row and the ephemeral
//! client-style ledger entry.

pub mod ledger;
pub mod level;
pub mod model;

pub use ledger::LedgerEntry;
pub use level::NotificationLevel;
pub use model::Notification;
