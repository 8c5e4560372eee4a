//! Enrollment access derivation and listing.

pub mod access;
pub mod service;

pub use access::AccessPolicy;
pub use service::EnrollmentService;
