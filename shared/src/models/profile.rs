//! User Profile Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User profile entity, keyed by the auth user id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserProfile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload; `None` fields keep the stored value
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfileUpsert {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfileUpsert {
    /// Merge onto an existing row (or start a fresh one)
    pub fn apply(self, existing: Option<UserProfile>) -> UserProfile {
        let existing = existing.unwrap_or(UserProfile {
            id: self.id,
            email: None,
            full_name: None,
            avatar_url: None,
            updated_at: self.updated_at,
        });
        UserProfile {
            id: self.id,
            email: self.email.or(existing.email),
            full_name: self.full_name.or(existing.full_name),
            avatar_url: self.avatar_url.or(existing.avatar_url),
            updated_at: self.updated_at,
        }
    }
}
