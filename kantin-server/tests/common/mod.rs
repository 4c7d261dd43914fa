//! Shared fixture for the API tests
//!
//! Frozen at 2026-10-19 12:00 WIB (05:00 UTC), Asia/Jakarta business time.
//!
//! | kantin | name          | hours         | switch | status   |
//! |--------|---------------|---------------|--------|----------|
//! | 1      | Kantin Teknik | 08:00–17:00   | on     | active   |
//! | 2      | Kantin Hukum  | 07:00–10:00   | on     | active   |
//! | 3      | Kantin Lama   | none          | off    | inactive |

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Local, TimeZone, Utc};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use mockable::Clock;
use kantin_server::AppState;
use kantin_server::api::create_router;
use kantin_server::catalog::{CanteenFilter, MenuQuery};
use kantin_server::db::{KantinStore, MemoryStore, SeedData, StoreError, StoreResult};
use serde_json::{Value, json};
use shared::models::{Kantin, MenuStat, OrderLine, UserProfile, UserProfileUpsert};
use tower::ServiceExt;

pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 5, 0, 0).unwrap()
}

pub fn seed() -> SeedData {
    serde_json::from_value(json!({
        "kantin": [
            {"id": 1, "nama_kantin": "Kantin Teknik", "jam_buka": "08:00", "jam_tutup": "17:00",
             "buka_tutup": true, "status": "active"},
            {"id": 2, "nama_kantin": "Kantin Hukum", "jam_buka": "07:00:00", "jam_tutup": "10:00:00",
             "buka_tutup": true, "status": "active"},
            {"id": 3, "nama_kantin": "Kantin Lama", "buka_tutup": false, "status": "inactive"}
        ],
        "menu": [
            {"id": 10, "kantin_id": 1, "nama_menu": "Nasi Goreng Spesial",
             "deskripsi": "Nasi goreng dengan telur dan kerupuk",
             "kategori_menu": ["Makan Siang"], "harga": 15000, "tersedia": true,
             "avg_rating": 4.5, "total_ratings": 20, "total_sold": 30,
             "created_at": "2026-09-01T03:00:00Z"},
            {"id": 11, "kantin_id": 1, "nama_menu": "Es Teh Manis",
             "kategori_menu": ["Minuman"], "harga": 4000, "tersedia": true,
             "avg_rating": 4.0, "total_ratings": 10, "total_sold": 50,
             "created_at": "2026-09-01T03:00:00Z"},
            {"id": 12, "kantin_id": 1, "nama_menu": "Bubur Ayam",
             "kategori_menu": ["Makan Pagi"], "harga": 10000, "tersedia": true,
             "created_at": "2026-10-18T17:01:00Z"},
            {"id": 13, "kantin_id": 1, "nama_menu": "Roti Bakar",
             "kategori_menu": ["Snack", "Makan Pagi"], "harga": 8000, "tersedia": false,
             "avg_rating": 3.8, "total_ratings": 5, "total_sold": 12,
             "created_at": "2026-10-15T03:00:00Z"},
            {"id": 20, "kantin_id": 2, "nama_menu": "Soto Ayam",
             "kategori_menu": ["Makan Siang"], "harga": 12000, "tersedia": true,
             "avg_rating": 4.8, "total_ratings": 4, "total_sold": 25,
             "created_at": "2026-10-18T16:59:00Z"},
            {"id": 21, "kantin_id": 2, "nama_menu": "Jus Alpukat",
             "kategori_menu": ["Minuman"], "harga": 9000, "tersedia": true,
             "avg_rating": 4.8, "total_ratings": 9, "total_sold": 8,
             "created_at": "2026-10-14T05:00:00Z"},
            {"id": 22, "kantin_id": 2, "nama_menu": "Mie Ayam",
             "harga": 11000, "tersedia": true,
             "avg_rating": 4.2, "total_ratings": 7, "total_sold": 25,
             "created_at": "2026-08-01T03:00:00Z"},
            {"id": 30, "kantin_id": 3, "nama_menu": "Pecel",
             "kategori_menu": ["Makan Siang"], "harga": 7000, "tersedia": true,
             "total_sold": 3, "created_at": "2026-10-19T01:00:00Z"}
        ],
        "pesanan": [
            {"id": 1, "status": "completed"},
            {"id": 2, "status": "completed"},
            {"id": 3, "status": "pending"},
            {"id": 4, "status": "cancelled"}
        ],
        "detail_pesanan": [
            {"pesanan_id": 1, "menu_id": 10, "jumlah": 2},
            {"pesanan_id": 2, "menu_id": 10, "jumlah": 3},
            {"pesanan_id": 3, "menu_id": 10, "jumlah": 7},
            {"pesanan_id": 1, "menu_id": 11, "jumlah": 1},
            {"pesanan_id": 4, "menu_id": 11, "jumlah": 9},
            {"pesanan_id": 2, "menu_id": 20, "jumlah": null},
            {"pesanan_id": 1, "menu_id": 22, "jumlah": 4}
        ]
    }))
    .unwrap()
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn state_at(now: DateTime<Utc>) -> AppState {
    AppState::with_store(Arc::new(MemoryStore::new(seed())))
        .with_clock(Arc::new(FixtureClock { utc_now: now }))
}

pub fn app() -> Router {
    create_router(state_at(noon()))
}

pub fn app_at(now: DateTime<Utc>) -> Router {
    create_router(state_at(now))
}

/// Message every [`BrokenStore`] call fails with
pub const STORE_DOWN: &str = "connection to server at \"db\" failed: Connection refused";

/// Store whose every call fails with [`STORE_DOWN`]
pub struct BrokenStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Database(STORE_DOWN.to_string()))
}

#[async_trait]
impl KantinStore for BrokenStore {
    async fn query_menu(&self, _query: &MenuQuery) -> StoreResult<Vec<MenuStat>> {
        down()
    }

    async fn find_kantin(&self, _filter: &CanteenFilter) -> StoreResult<Option<Kantin>> {
        down()
    }

    async fn list_kantin(&self) -> StoreResult<Vec<Kantin>> {
        down()
    }

    async fn count_available_menu(&self, _kantin_id: i64) -> StoreResult<i64> {
        down()
    }

    async fn order_lines_for_menus(&self, _menu_ids: &[i64]) -> StoreResult<Vec<OrderLine>> {
        down()
    }

    async fn completed_order_ids(&self, _order_ids: &[i64]) -> StoreResult<HashSet<i64>> {
        down()
    }

    async fn upsert_profile(&self, _profile: UserProfileUpsert) -> StoreResult<UserProfile> {
        down()
    }

    async fn ping(&self) -> StoreResult<i64> {
        down()
    }
}

pub fn broken_app() -> Router {
    create_router(
        AppState::with_store(Arc::new(BrokenStore))
            .with_clock(Arc::new(FixtureClock { utc_now: noon() })),
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// `id` of every item in `body.items`
pub fn ids(body: &Value) -> Vec<i64> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
