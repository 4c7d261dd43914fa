//! Kantin Model

use serde::{Deserialize, Serialize};

/// Status value of a canteen that is operating
pub const KANTIN_STATUS_ACTIVE: &str = "active";

/// Canteen entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Kantin {
    pub id: i64,
    pub nama_kantin: String,
    /// Opening time, `HH:MM` or `HH:MM:SS`
    pub jam_buka: Option<String>,
    /// Closing time, `HH:MM` or `HH:MM:SS`
    pub jam_tutup: Option<String>,
    /// Open/closed switch maintained by the canteen owner
    #[serde(default)]
    pub buka_tutup: bool,
    pub status: Option<String>,
    pub foto_kantin: Option<String>,
}

impl Kantin {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(KANTIN_STATUS_ACTIVE)
    }

    /// Case-insensitive substring match on the canteen name
    pub fn name_matches(&self, needle: &str) -> bool {
        self.nama_kantin
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_ignores_case() {
        let kantin = Kantin {
            id: 1,
            nama_kantin: "Kantin Teknik".to_string(),
            ..Default::default()
        };
        assert!(kantin.name_matches("teknik"));
        assert!(kantin.name_matches("KANTIN"));
        assert!(!kantin.name_matches("hukum"));
    }

    #[test]
    fn test_is_active() {
        let mut kantin = Kantin::default();
        assert!(!kantin.is_active());
        kantin.status = Some("active".to_string());
        assert!(kantin.is_active());
        kantin.status = Some("inactive".to_string());
        assert!(!kantin.is_active());
    }
}
