//! Job handler implementations.

pub mod email;
pub mod notification;

pub use email::ApprovalEmailHandler;
pub use notification::NotificationTrimHandler;
