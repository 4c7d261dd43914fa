//! Data models
//!
//! Rows surfaced from the database (tables `kantin`, `pesanan`,
//! `detail_pesanan`, `user_profiles` and the view `v_menu_stats`).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Kantin, menu and order ids are `i64` (BIGINT); profile ids are UUIDs.

pub mod kantin;
pub mod menu;
pub mod order;
pub mod profile;

// Re-exports
pub use kantin::*;
pub use menu::*;
pub use order::*;
pub use profile::*;
