//! # itqan-entity
//!
//! Domain entity models for ITQAN Academy. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod course;
pub mod enrollment;
pub mod job;
pub mod notification;
pub mod payment;
pub mod user;
