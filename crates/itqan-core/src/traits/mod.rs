//! Core traits defined in `itqan-core` and implemented by other crates.

pub mod cache;
pub mod hints;
pub mod storage;

pub use cache::CacheProvider;
pub use hints::HintSink;
pub use storage::ObjectStore;
