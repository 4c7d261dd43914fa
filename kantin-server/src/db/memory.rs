//! In-memory store
//!
//! Holds the same rows the database would return, behind a `RwLock`.
//! Used when no `DATABASE_URL` is configured and by the test suite.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use shared::models::{
    Kantin, MenuStat, ORDER_STATUS_COMPLETED, OrderLine, Pesanan, UserProfile, UserProfileUpsert,
};
use uuid::Uuid;

use super::{KantinStore, StoreError, StoreResult};
use crate::catalog::{CanteenFilter, MenuQuery};

/// Seed fixture, same shape as the database tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub kantin: Vec<Kantin>,
    /// Rows of `v_menu_stats`
    pub menu: Vec<MenuStat>,
    pub pesanan: Vec<Pesanan>,
    pub detail_pesanan: Vec<OrderLine>,
    pub user_profiles: Vec<UserProfile>,
}

impl SeedData {
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Seed(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[derive(Debug, Default)]
struct Tables {
    kantin: Vec<Kantin>,
    menu: Vec<MenuStat>,
    pesanan: Vec<Pesanan>,
    detail_pesanan: Vec<OrderLine>,
    profiles: HashMap<Uuid, UserProfile>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new(seed: SeedData) -> Self {
        let profiles = seed
            .user_profiles
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Self {
            tables: RwLock::new(Tables {
                kantin: seed.kantin,
                menu: seed.menu,
                pesanan: seed.pesanan,
                detail_pesanan: seed.detail_pesanan,
                profiles,
            }),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn profile(&self, id: &Uuid) -> Option<UserProfile> {
        self.tables.read().profiles.get(id).cloned()
    }
}

impl Tables {
    fn kantin_of(&self, kantin_id: i64) -> Option<&Kantin> {
        self.kantin.iter().find(|k| k.id == kantin_id)
    }

    fn canteen_matches(&self, query: &MenuQuery, item: &MenuStat) -> bool {
        if let Some(CanteenFilter::Name(name)) = &query.canteen
            && !self.kantin_of(item.kantin_id).is_some_and(|k| k.name_matches(name))
        {
            return false;
        }
        if query.active_canteens_only
            && !self.kantin_of(item.kantin_id).is_some_and(Kantin::is_active)
        {
            return false;
        }
        true
    }
}

#[async_trait]
impl KantinStore for MemoryStore {
    async fn query_menu(&self, query: &MenuQuery) -> StoreResult<Vec<MenuStat>> {
        let tables = self.tables.read();
        let mut items: Vec<MenuStat> = tables
            .menu
            .iter()
            .filter(|item| query.matches(item) && tables.canteen_matches(query, item))
            .cloned()
            .collect();
        items.sort_by(|a, b| query.compare(a, b));
        items.truncate(usize::try_from(query.limit).unwrap_or(0));
        Ok(items)
    }

    async fn find_kantin(&self, filter: &CanteenFilter) -> StoreResult<Option<Kantin>> {
        let tables = self.tables.read();
        let found = match filter {
            CanteenFilter::Id(id) => tables.kantin_of(*id),
            CanteenFilter::Name(name) => tables
                .kantin
                .iter()
                .filter(|k| k.name_matches(name))
                .min_by_key(|k| k.id),
        };
        Ok(found.cloned())
    }

    async fn list_kantin(&self) -> StoreResult<Vec<Kantin>> {
        let mut all = self.tables.read().kantin.clone();
        all.sort_by(|a, b| a.nama_kantin.cmp(&b.nama_kantin).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn count_available_menu(&self, kantin_id: i64) -> StoreResult<i64> {
        let count = self
            .tables
            .read()
            .menu
            .iter()
            .filter(|m| m.kantin_id == kantin_id && m.tersedia)
            .count();
        Ok(count as i64)
    }

    async fn order_lines_for_menus(&self, menu_ids: &[i64]) -> StoreResult<Vec<OrderLine>> {
        let wanted: HashSet<i64> = menu_ids.iter().copied().collect();
        Ok(self
            .tables
            .read()
            .detail_pesanan
            .iter()
            .filter(|line| wanted.contains(&line.menu_id))
            .cloned()
            .collect())
    }

    async fn completed_order_ids(&self, order_ids: &[i64]) -> StoreResult<HashSet<i64>> {
        let wanted: HashSet<i64> = order_ids.iter().copied().collect();
        Ok(self
            .tables
            .read()
            .pesanan
            .iter()
            .filter(|p| wanted.contains(&p.id) && p.status == ORDER_STATUS_COMPLETED)
            .map(|p| p.id)
            .collect())
    }

    async fn upsert_profile(&self, profile: UserProfileUpsert) -> StoreResult<UserProfile> {
        let mut tables = self.tables.write();
        let existing = tables.profiles.remove(&profile.id);
        let merged = profile.apply(existing);
        tables.profiles.insert(merged.id, merged.clone());
        Ok(merged)
    }

    async fn ping(&self) -> StoreResult<i64> {
        Ok(self.tables.read().kantin.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SortKey;
    use chrono::{TimeZone, Utc};

    fn seed() -> SeedData {
        SeedData::from_json(
            r#"{
                "kantin": [
                    {"id": 1, "nama_kantin": "Kantin Teknik", "status": "active", "buka_tutup": true},
                    {"id": 2, "nama_kantin": "Kantin Hukum", "status": "inactive"}
                ],
                "menu": [
                    {"id": 10, "kantin_id": 1, "nama_menu": "Nasi Goreng", "harga": 15000,
                     "tersedia": true, "total_sold": 7, "created_at": "2026-10-01T00:00:00Z"},
                    {"id": 11, "kantin_id": 1, "nama_menu": "Es Jeruk", "harga": 5000,
                     "kategori_menu": ["Minuman"], "tersedia": false,
                     "created_at": "2026-10-01T00:00:00Z"},
                    {"id": 20, "kantin_id": 2, "nama_menu": "Soto", "harga": 12000,
                     "tersedia": true, "total_sold": 9, "created_at": "2026-10-01T00:00:00Z"}
                ],
                "pesanan": [{"id": 1, "status": "completed"}, {"id": 2, "status": "pending"}],
                "detail_pesanan": [
                    {"pesanan_id": 1, "menu_id": 10, "jumlah": 2},
                    {"pesanan_id": 2, "menu_id": 10, "jumlah": 5}
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_query_menu_filters_by_canteen_name() {
        let store = MemoryStore::new(seed());
        let query = MenuQuery::new(10)
            .canteen(Some(CanteenFilter::Name("teknik".to_string())))
            .order_by(vec![SortKey::BestSellerDesc]);
        let items = store.query_menu(&query).await.unwrap();
        let ids: Vec<i64> = items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10]);
    }

    #[tokio::test]
    async fn test_query_menu_active_canteens_and_limit() {
        let store = MemoryStore::new(seed());
        let all = MenuQuery::new(10).order_by(vec![SortKey::BestSellerDesc]);
        let items = store.query_menu(&all).await.unwrap();
        assert_eq!(items.iter().map(|m| m.id).collect::<Vec<_>>(), vec![20, 10]);

        let active = all.clone().active_canteens_only();
        assert_eq!(store.query_menu(&active).await.unwrap().len(), 1);

        let limited = MenuQuery::new(1).order_by(vec![SortKey::BestSellerDesc]);
        assert_eq!(store.query_menu(&limited).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_kantin_and_counts() {
        let store = MemoryStore::new(seed());
        let by_name = store
            .find_kantin(&CanteenFilter::Name("HUKUM".to_string()))
            .await
            .unwrap();
        assert_eq!(by_name.map(|k| k.id), Some(2));
        assert!(store.find_kantin(&CanteenFilter::Id(99)).await.unwrap().is_none());
        assert_eq!(store.count_available_menu(1).await.unwrap(), 1);
        assert_eq!(store.ping().await.unwrap(), 2);

        let names: Vec<String> = store
            .list_kantin()
            .await
            .unwrap()
            .into_iter()
            .map(|k| k.nama_kantin)
            .collect();
        assert_eq!(names, vec!["Kantin Hukum", "Kantin Teknik"]);
    }

    #[tokio::test]
    async fn test_order_lookups() {
        let store = MemoryStore::new(seed());
        let lines = store.order_lines_for_menus(&[10, 11]).await.unwrap();
        assert_eq!(lines.len(), 2);
        let completed = store.completed_order_ids(&[1, 2]).await.unwrap();
        assert_eq!(completed, [1].into_iter().collect());
    }

    #[tokio::test]
    async fn test_upsert_profile_keeps_stored_fields() {
        let store = MemoryStore::empty();
        let id = Uuid::new_v4();
        let first = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        store
            .upsert_profile(UserProfileUpsert {
                id,
                email: Some("sari@kampus.ac.id".to_string()),
                full_name: Some("Sari".to_string()),
                avatar_url: None,
                updated_at: first,
            })
            .await
            .unwrap();
        let second = store
            .upsert_profile(UserProfileUpsert {
                id,
                email: None,
                full_name: None,
                avatar_url: Some("https://cdn/sari.png".to_string()),
                updated_at: first + chrono::Duration::hours(1),
            })
            .await
            .unwrap();
        assert_eq!(second.email.as_deref(), Some("sari@kampus.ac.id"));
        assert_eq!(second.full_name.as_deref(), Some("Sari"));
        assert_eq!(second.avatar_url.as_deref(), Some("https://cdn/sari.png"));
        assert_eq!(store.profile(&id), Some(second));
    }

    #[test]
    fn test_bad_seed_is_reported() {
        let err = SeedData::from_json("{\"kantin\": 5}").unwrap_err();
        assert!(matches!(err, StoreError::Seed(_)));
    }
}
