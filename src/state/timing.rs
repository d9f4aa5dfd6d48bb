use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response of `GET states/timing`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Timing {
    pub tick: u64,

    /// Seconds until the server executes the next tick (may be <= 0 at the boundary)
    pub time_to_next_execution: f64,

    #[serde(default)]
    pub time_of_next_execution: String,
}

impl Timing {
    /// How long to sleep before polling again.
    ///
    /// Negative and NaN become zero; values beyond `Duration` range saturate.
    pub fn sleep_duration(&self) -> Duration {
        let secs = self.time_to_next_execution;
        if secs.is_nan() || secs <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// Parsed `time_of_next_execution`. Naive timestamps are taken as UTC.
    pub fn next_execution_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.time_of_next_execution)
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Static rules of the running game (`GET states/game_rules`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRules {
    /// Board edge length; valid coordinates are `0..map_size` on both axes
    pub map_size: i64,
    pub max_ticks: u64,
    pub max_score: i64,
    pub home_flag_required: bool,
    pub capture_score: i64,
    pub kill_score: i64,
    pub winning_bonus: i64,
}
