//! Domain events emitted by ITQAN operations.
//!
//! The real-time hint channel carries [`EnrollmentEvent`] payloads;
//! every access-changing operation publishes one after its durable
//! mutation commits.

pub mod enrollment;

pub use enrollment::EnrollmentEvent;
