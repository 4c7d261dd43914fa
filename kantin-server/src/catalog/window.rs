//! New-menu period window

use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Since local midnight in the business timezone
    Today,
    /// Last 7×24h
    #[default]
    Week,
    /// Last 30×24h
    Month,
}

impl Period {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "hari ini",
            Self::Week => "7 hari terakhir",
            Self::Month => "30 hari terakhir",
        }
    }

    /// Phrase used in the response message ("... menu baru hari ini")
    pub fn phrase(&self) -> String {
        match self {
            Self::Today => self.label().to_string(),
            _ => format!("dalam {}", self.label()),
        }
    }

    /// Inclusive lower bound on `created_at`
    pub fn window_start(&self, now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
        match self {
            Self::Today => local_midnight(now, tz),
            Self::Week => now - Duration::days(7),
            Self::Month => now - Duration::days(30),
        }
    }
}

/// Start of the current local day, as UTC
///
/// DST gap fallback: a non-existent local midnight is read as UTC.
pub fn local_midnight(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let naive = now.with_timezone(&tz).date_naive().and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Whole days elapsed since creation, never negative
pub fn days_since(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Jakarta;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(Period::parse("today"), Some(Period::Today));
        assert_eq!(Period::parse(" WEEK "), Some(Period::Week));
        assert_eq!(Period::parse("month"), Some(Period::Month));
        assert_eq!(Period::parse("year"), None);
        assert_eq!(Period::default(), Period::Week);
    }

    #[test]
    fn test_today_starts_at_local_midnight() {
        // 12:00 WIB on 19 Oct = 05:00 UTC
        let now = utc(2026, 10, 19, 5, 0);
        let start = Period::Today.window_start(now, Jakarta);
        // 00:00 WIB on 19 Oct = 17:00 UTC on 18 Oct
        assert_eq!(start, utc(2026, 10, 18, 17, 0));

        let yesterday_2359 = utc(2026, 10, 18, 16, 59);
        let today_0001 = utc(2026, 10, 18, 17, 1);
        assert!(yesterday_2359 < start);
        assert!(today_0001 >= start);
    }

    #[test]
    fn test_today_just_after_utc_midnight() {
        // 06:30 WIB on 19 Oct is still 18 Oct in UTC
        let now = utc(2026, 10, 18, 23, 30);
        assert_eq!(
            Period::Today.window_start(now, Jakarta),
            utc(2026, 10, 18, 17, 0)
        );
    }

    #[test]
    fn test_rolling_windows() {
        let now = utc(2026, 10, 19, 5, 0);
        assert_eq!(Period::Week.window_start(now, Jakarta), utc(2026, 10, 12, 5, 0));
        assert_eq!(Period::Month.window_start(now, Jakarta), utc(2026, 9, 19, 5, 0));
    }

    #[test]
    fn test_days_since() {
        let now = utc(2026, 10, 19, 5, 0);
        assert_eq!(days_since(utc(2026, 10, 19, 1, 0), now), 0);
        assert_eq!(days_since(utc(2026, 10, 17, 6, 0), now), 1);
        assert_eq!(days_since(utc(2026, 10, 12, 5, 0), now), 7);
        assert_eq!(days_since(utc(2026, 10, 20, 0, 0), now), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Period::Today.phrase(), "hari ini");
        assert_eq!(Period::Week.phrase(), "dalam 7 hari terakhir");
        assert_eq!(Period::Month.label(), "30 hari terakhir");
    }
}
