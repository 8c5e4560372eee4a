//! Enrollment entity.

pub mod model;

pub use model::Enrollment;
