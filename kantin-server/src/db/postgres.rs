//! PostgreSQL store
//!
//! Reads the `kantin`, `pesanan`, `detail_pesanan` tables and the
//! `v_menu_stats` view; writes `user_profiles` only.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use shared::models::{
    Kantin, MenuStat, ORDER_STATUS_COMPLETED, OrderLine, UserProfile, UserProfileUpsert,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::sql::MenuSql;
use super::{KantinStore, StoreResult};
use crate::catalog::{CanteenFilter, MenuQuery};

const KANTIN_COLUMNS: &str = "id::int8 AS id, nama_kantin, jam_buka::text AS jam_buka, \
     jam_tutup::text AS jam_tutup, COALESCE(buka_tutup, FALSE) AS buka_tutup, status, foto_kantin";

const PROFILE_COLUMNS: &str = "id, email, full_name, avatar_url, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool, optionally applying the bundled migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        migrate: bool,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;
        tracing::info!(max_connections, "Connected to PostgreSQL");

        if migrate {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl KantinStore for PgStore {
    async fn query_menu(&self, query: &MenuQuery) -> StoreResult<Vec<MenuStat>> {
        let sql = MenuSql::from_query(query);
        let text = sql.sql();
        tracing::debug!(sql = %text, "Menu query");
        let rows = sql
            .apply_bindings(sqlx::query_as::<_, MenuStat>(&text))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_kantin(&self, filter: &CanteenFilter) -> StoreResult<Option<Kantin>> {
        let row = match filter {
            CanteenFilter::Id(id) => {
                sqlx::query_as::<_, Kantin>(&format!(
                    "SELECT {KANTIN_COLUMNS} FROM kantin WHERE id = $1 LIMIT 1"
                ))
                .bind(*id)
                .fetch_optional(&self.pool)
                .await?
            }
            CanteenFilter::Name(name) => {
                sqlx::query_as::<_, Kantin>(&format!(
                    "SELECT {KANTIN_COLUMNS} FROM kantin WHERE nama_kantin ILIKE $1 \
                     ORDER BY id ASC LIMIT 1"
                ))
                .bind(super::sql::like_pattern(name))
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(row)
    }

    async fn list_kantin(&self) -> StoreResult<Vec<Kantin>> {
        let rows = sqlx::query_as::<_, Kantin>(&format!(
            "SELECT {KANTIN_COLUMNS} FROM kantin ORDER BY nama_kantin ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_available_menu(&self, kantin_id: i64) -> StoreResult<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM menu WHERE kantin_id = $1 AND tersedia = TRUE")
                .bind(kantin_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    async fn order_lines_for_menus(&self, menu_ids: &[i64]) -> StoreResult<Vec<OrderLine>> {
        if menu_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, OrderLine>(
            "SELECT pesanan_id::int8 AS pesanan_id, menu_id::int8 AS menu_id, jumlah::int8 AS jumlah
                FROM detail_pesanan
                WHERE menu_id = ANY($1)",
        )
        .bind(menu_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn completed_order_ids(&self, order_ids: &[i64]) -> StoreResult<HashSet<i64>> {
        if order_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT id::int8 FROM pesanan WHERE id = ANY($1) AND status = $2")
                .bind(order_ids)
                .bind(ORDER_STATUS_COMPLETED)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn upsert_profile(&self, profile: UserProfileUpsert) -> StoreResult<UserProfile> {
        let row = sqlx::query_as::<_, UserProfile>(&format!(
            "INSERT INTO user_profiles (id, email, full_name, avatar_url, updated_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE SET
                    email = COALESCE(EXCLUDED.email, user_profiles.email),
                    full_name = COALESCE(EXCLUDED.full_name, user_profiles.full_name),
                    avatar_url = COALESCE(EXCLUDED.avatar_url, user_profiles.avatar_url),
                    updated_at = EXCLUDED.updated_at
                RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(profile.id)
        .bind(profile.email)
        .bind(profile.full_name)
        .bind(profile.avatar_url)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn ping(&self) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kantin")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::MAX_LIMIT;

    #[test]
    fn test_limit_bound_matches_query_clamp() {
        let query = MenuQuery::new(1000);
        assert_eq!(query.limit, MAX_LIMIT);
        let sql = MenuSql::from_query(&query);
        assert!(sql.sql().ends_with(&format!("LIMIT ${}", sql.bindings().len())));
    }
}
