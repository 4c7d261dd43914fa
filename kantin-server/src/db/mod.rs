//! Data store capability
//!
//! Handlers talk to the database only through [`KantinStore`]. Two adapters
//! exist: [`postgres::PgStore`] for the real database and
//! [`memory::MemoryStore`] for development and tests.

pub mod memory;
pub mod postgres;
pub mod sql;

use std::collections::HashSet;

use async_trait::async_trait;
use shared::models::{Kantin, MenuStat, OrderLine, UserProfile, UserProfileUpsert};
use thiserror::Error;

use crate::catalog::{CanteenFilter, MenuQuery};

pub use memory::{MemoryStore, SeedData};
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the database, message passed through
    #[error("{0}")]
    Database(String),

    #[error("Invalid seed data: {0}")]
    Seed(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::Database(db_err.message().to_string()),
            other => StoreError::Database(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait KantinStore: Send + Sync {
    /// Menu items (from `v_menu_stats`) matching the query, ordered and limited
    async fn query_menu(&self, query: &MenuQuery) -> StoreResult<Vec<MenuStat>>;

    /// First canteen matching the filter (lowest id for name matches)
    async fn find_kantin(&self, filter: &CanteenFilter) -> StoreResult<Option<Kantin>>;

    /// All canteens ordered by name
    async fn list_kantin(&self) -> StoreResult<Vec<Kantin>>;

    /// Number of available menu items of a canteen
    async fn count_available_menu(&self, kantin_id: i64) -> StoreResult<i64>;

    /// Order line items referencing any of the menu ids
    async fn order_lines_for_menus(&self, menu_ids: &[i64]) -> StoreResult<Vec<OrderLine>>;

    /// Subset of the order ids whose status is "completed"
    async fn completed_order_ids(&self, order_ids: &[i64]) -> StoreResult<HashSet<i64>>;

    /// Insert or update a profile keyed by id; absent fields keep stored values
    async fn upsert_profile(&self, profile: UserProfileUpsert) -> StoreResult<UserProfile>;

    /// Connectivity check; returns the number of canteens
    async fn ping(&self) -> StoreResult<i64>;
}
