//! Pub/sub channels and subscription tracking.

pub mod channel;
pub mod registry;
pub mod subscription;

pub use channel::Channel;
pub use registry::ChannelRegistry;
pub use subscription::SubscriptionTracker;
