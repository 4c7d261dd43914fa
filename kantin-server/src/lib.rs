//! kantin-server: E-Kantin backend API
//!
//! HTTP handlers over the canteen database:
//! - canteen and menu browsing tools (search, rankings, new menus, opening hours)
//! - menu sales counts from completed orders
//! - user profile upsert
//! - database and email connectivity checks

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod logger;
pub mod state;

pub use config::Config;
pub use state::AppState;
