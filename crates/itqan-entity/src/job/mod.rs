//! Background job entity and status enums.

pub mod model;
pub mod status;

pub use model::Job;
pub use status::{JobPriority, JobStatus};
