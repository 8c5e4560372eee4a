//! # itqan-worker
//!
//! Background job processing for ITQAN. Fire-and-forget side effects of
//! the payment workflow (approval emails) and maintenance tasks
//! (notification retention) run here as persisted jobs with bounded
//! retries, instead of as swallowed-error callbacks on the request path.

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use queue::JobQueue;
pub use runner::WorkerRunner;
