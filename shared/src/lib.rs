//! Shared types for the POS admin backend
//!
//! Models and request/response DTOs used by the server and by API clients.
//! Database derives (`sqlx::FromRow`) are gated behind the `db` feature so
//! that pure clients do not pull in sqlx.

pub mod client;
pub mod models;

pub use client::*;
pub use models::*;
