//! Application state

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use mockable::{Clock, DefaultClock};

use crate::config::{Config, DEFAULT_TIMEZONE};
use crate::db::{KantinStore, MemoryStore, PgStore, SeedData};
use crate::email::Mailer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KantinStore>,
    /// `None` when no email provider is configured
    pub mailer: Option<Arc<Mailer>>,
    pub clock: Arc<dyn Clock + Send + Sync>,
    pub timezone: Tz,
    pub email_test_to: Option<String>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store: Arc<dyn KantinStore> = match &config.database_url {
            Some(url) => Arc::new(
                PgStore::connect(url, config.database_max_connections, config.database_migrate)
                    .await?,
            ),
            None => {
                let seed = match &config.seed_file {
                    Some(path) => SeedData::from_file(path)?,
                    None => SeedData::default(),
                };
                tracing::warn!(
                    kantin = seed.kantin.len(),
                    menu = seed.menu.len(),
                    "DATABASE_URL not set, using in-memory store"
                );
                Arc::new(MemoryStore::new(seed))
            }
        };

        let mailer = match &config.resend_api_key {
            Some(key) => Some(Arc::new(Mailer::new(
                &config.email_api_url,
                key,
                &config.email_from,
            ))),
            None => {
                tracing::warn!("RESEND_API_KEY not set, email disabled");
                None
            }
        };

        Ok(Self {
            store,
            mailer,
            clock: Arc::new(DefaultClock),
            timezone: config.timezone,
            email_test_to: config.email_test_to.clone(),
        })
    }

    /// State over an existing store, system clock, default timezone
    pub fn with_store(store: Arc<dyn KantinStore>) -> Self {
        Self {
            store,
            mailer: None,
            clock: Arc::new(DefaultClock),
            timezone: DEFAULT_TIMEZONE,
            email_test_to: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_mailer(mut self, mailer: Mailer) -> Self {
        self.mailer = Some(Arc::new(mailer));
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Current wall-clock time in the business timezone
    pub fn local_now(&self) -> DateTime<Tz> {
        self.now().with_timezone(&self.timezone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[tokio::test]
    async fn test_new_loads_seed_file_without_database() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"kantin": [{{"id": 1, "nama_kantin": "Kantin Pusat", "buka_tutup": true}}]}}"#
        )
        .unwrap();

        let vars: HashMap<&str, String> = [
            ("SEED_FILE", file.path().display().to_string()),
            ("APP_TIMEZONE", "Asia/Makassar".to_string()),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

        let state = AppState::new(&config).await.unwrap();
        assert_eq!(state.store.ping().await.unwrap(), 1);
        assert!(state.mailer.is_none());
        assert_eq!(state.timezone, chrono_tz::Asia::Makassar);
    }

    #[test]
    fn test_local_now_crosses_midnight_in_business_timezone() {
        use chrono::{TimeZone, Timelike};

        let mut clock = mockable::MockClock::new();
        clock
            .expect_utc()
            .return_const(Utc.with_ymd_and_hms(2026, 10, 18, 17, 30, 0).unwrap());
        let state = AppState::with_store(Arc::new(MemoryStore::new(SeedData::default())))
            .with_clock(Arc::new(clock));

        let local = state.local_now();
        assert_eq!(local.date_naive().to_string(), "2026-10-19");
        assert_eq!((local.hour(), local.minute()), (0, 30));
    }

    #[tokio::test]
    async fn test_missing_seed_file_fails() {
        let config = Config::from_lookup(|key| {
            (key == "SEED_FILE").then(|| "/nonexistent/kantin-seed.json".to_string())
        })
        .unwrap();
        assert!(AppState::new(&config).await.is_err());
    }
}
