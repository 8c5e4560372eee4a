//! # itqan-cache
//!
//! Cache provider implementations for ITQAN. The in-process provider is
//! built on [moka](https://crates.io/crates/moka) and backs two concerns:
//!
//! - read-through-then-refresh list caches (course lists, enrollment
//!   lists) rendered instantly and overwritten after authoritative
//!   fetches
//! - the ephemeral notification ledgers (capped, most-recent-first)
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
pub mod memory;
pub mod provider;

pub use provider::CacheManager;
