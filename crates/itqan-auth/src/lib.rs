//! # itqan-auth
//!
//! Authentication primitives for ITQAN: Argon2id password hashing,
//! password strength validation, and JWT access tokens.
//!
//! Passwords are never stored or compared in plaintext anywhere in the
//! platform.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
