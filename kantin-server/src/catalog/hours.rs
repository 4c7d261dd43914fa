//! Canteen open/closed computation
//!
//! A canteen is open when its owner switch (`buka_tutup`) is on AND the
//! local time falls inside `[jam_buka, jam_tutup]` (both ends inclusive).
//! Windows whose closing time is before the opening time wrap past
//! midnight. Missing or unparseable hours fall back to the switch alone.

use chrono::{NaiveTime, Timelike};
use shared::models::Kantin;

/// Parse `HH:MM` or `HH:MM:SS` into minutes since midnight (seconds ignored)
pub fn parse_minutes(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    if let Some(seconds) = parts.next() {
        // Postgres TIME text may carry a fraction ("08:00:00.5")
        let seconds: f64 = seconds.trim().parse().ok()?;
        if !(0.0..60.0).contains(&seconds) {
            return None;
        }
    }
    if parts.next().is_some() || hour >= 24 || minute >= 60 {
        return None;
    }
    Some(hour * 60 + minute)
}

pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Core rule, on minutes since midnight
pub fn is_open_at(
    jam_buka: Option<&str>,
    jam_tutup: Option<&str>,
    switch_on: bool,
    now_minutes: u32,
) -> bool {
    if !switch_on {
        return false;
    }
    let (Some(open_raw), Some(close_raw)) = (jam_buka, jam_tutup) else {
        return switch_on;
    };
    let (Some(open), Some(close)) = (parse_minutes(open_raw), parse_minutes(close_raw)) else {
        tracing::warn!(
            jam_buka = open_raw,
            jam_tutup = close_raw,
            "Unparseable opening hours, using stored flag"
        );
        return switch_on;
    };

    if open <= close {
        open <= now_minutes && now_minutes <= close
    } else {
        // overnight window
        now_minutes >= open || now_minutes <= close
    }
}

/// "Open now" for a canteen at the given local wall-clock time
pub fn is_open_now(kantin: &Kantin, local_time: NaiveTime) -> bool {
    is_open_at(
        kantin.jam_buka.as_deref(),
        kantin.jam_tutup.as_deref(),
        kantin.buka_tutup,
        minutes_of_day(local_time),
    )
}
