//! # itqan-service
//!
//! Business logic service layer for ITQAN. Each service orchestrates
//! repositories, cache, storage, and authentication to implement
//! application-level use cases — most importantly the payment approval
//! workflow and its enrollment side effects.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod course;
pub mod email;
pub mod enrollment;
mod media;
pub mod notification;
pub mod payment;
pub mod user;

pub use context::RequestContext;
pub use course::CourseService;
pub use email::{ApprovalMailer, MailDeliveryError};
pub use enrollment::{AccessPolicy, EnrollmentService};
pub use notification::{NotificationLedger, NotificationService};
pub use payment::PaymentService;
pub use user::UserService;
