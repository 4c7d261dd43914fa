//! Menu Model (row of the `v_menu_stats` view)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Menu item joined with its rating and sales aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuStat {
    pub id: i64,
    pub kantin_id: i64,
    pub nama_menu: String,
    pub deskripsi: Option<String>,
    /// Category labels, e.g. `["Makan Siang", "Minuman"]`
    #[serde(default)]
    pub kategori_menu: Vec<String>,
    /// Price in rupiah
    pub harga: i64,
    #[serde(default)]
    pub tersedia: bool,
    pub foto_menu: Option<String>,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_ratings: i64,
    #[serde(default)]
    pub total_sold: i64,
    pub created_at: DateTime<Utc>,
}

impl MenuStat {
    /// Case-insensitive substring match on name or description
    pub fn text_matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.nama_menu.to_lowercase().contains(&needle)
            || self
                .deskripsi
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
