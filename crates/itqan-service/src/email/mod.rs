//! Outbound transactional email.

pub mod mailer;

pub use mailer::{ApprovalMailer, MailDeliveryError};
