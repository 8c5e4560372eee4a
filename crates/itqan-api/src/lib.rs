//! # itqan-api
//!
//! HTTP API layer for ITQAN built on Axum. Routes, request/response
//! DTOs, the authenticated-user extractor, handlers, and the WebSocket
//! upgrade for the hint channel.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
