//! Shared types for the E-Kantin API
//!
//! Error system and database row models used by the server and by its
//! integration tests.

pub mod error;
pub mod models;
