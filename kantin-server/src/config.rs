//! Server configuration

use chrono_tz::Tz;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jakarta;
pub const DEFAULT_EMAIL_FROM: &str = "E-Kantin <noreply@ekantin.app>";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    pub http_port: u16,
    /// PostgreSQL connection URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Apply bundled migrations on start
    pub database_migrate: bool,
    /// JSON fixture for the in-memory store
    pub seed_file: Option<String>,
    /// Business timezone for opening hours and "today"
    pub timezone: Tz,
    /// Resend API key; `None` disables email
    pub resend_api_key: Option<String>,
    pub email_from: String,
    pub email_api_url: String,
    /// Default recipient of the test email
    pub email_test_to: Option<String>,
    /// `*` or a single origin
    pub cors_allow_origin: String,
    /// `json` for JSON log lines
    pub log_format: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let database_url = var("DATABASE_URL");
        if database_url.is_none() && environment == "production" {
            return Err("DATABASE_URL must be set in production environment".into());
        }

        let timezone = match var("APP_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| format!("Invalid APP_TIMEZONE '{name}': {e}"))?,
            None => DEFAULT_TIMEZONE,
        };

        Ok(Self {
            environment,
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
            database_migrate: var("DATABASE_MIGRATE")
                .is_some_and(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes")),
            seed_file: var("SEED_FILE"),
            timezone,
            resend_api_key: var("RESEND_API_KEY"),
            email_from: var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.into()),
            email_api_url: var("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.into()),
            email_test_to: var("EMAIL_TEST_TO"),
            cors_allow_origin: var("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".into()),
            log_format: var("LOG_FORMAT"),
        })
    }
}
