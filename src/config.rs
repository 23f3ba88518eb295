use anyhow::{bail, Result};
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
#[cfg(test)]
use std::collections::HashMap;
use std::env;
use tracing::warn;

/// Daily window during which deliveries may be scheduled, for every day.
/// The window closes at the top of `end_hour`: `end:00` is accepted,
/// `end:01` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        // Permissive fallback so the picker stays usable when settings
        // fail to load
        Self {
            start_hour: 0,
            end_hour: 23,
        }
    }
}

impl WorkingHours {
    /// True when `hour:minute` falls past the close of the window
    pub fn is_past_close(&self, hour: u32, minute: u32) -> bool {
        hour > self.end_hour || (hour == self.end_hour && minute > 0)
    }

    /// True when `hour:minute` falls inside the schedulable window
    pub fn contains(&self, hour: u32, minute: u32) -> bool {
        hour >= self.start_hour && !self.is_past_close(hour, minute)
    }
}

/// Scheduling settings, loaded once from the remote settings store and
/// treated as read-only for the duration of a validation pass.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    pub working_hours: WorkingHours,

    /// Minutes of preparation lead time between "now" and the earliest
    /// deliverable instant
    pub min_delay_minutes: i64,

    /// Look-ahead window in days, inclusive of today; 1 means today only
    pub max_delivery_days: u32,

    /// Store timezone; all "today" decisions are made on this zone's clock
    pub timezone: Tz,
}

pub const DEFAULT_MIN_DELAY_MINUTES: i64 = 0;
pub const DEFAULT_MAX_DELIVERY_DAYS: u32 = 7;

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            min_delay_minutes: DEFAULT_MIN_DELAY_MINUTES,
            max_delivery_days: DEFAULT_MAX_DELIVERY_DAYS,
            timezone: Tz::UTC,
        }
    }
}

impl SchedulingConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env if present, ignore if missing
        Self::from_getter(|key| env::var(key).ok())
    }

    /// Parse config from a custom getter function (for testing).
    ///
    /// Loading never fails: malformed or missing values fall back to the
    /// documented defaults so the picker degrades gracefully instead of
    /// refusing to open. `validate()` reports anything suspicious.
    pub fn from_getter<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let start_hour = match get("WORKING_HOURS_START").as_deref().map(parse_settings_hour) {
            Some(Some(h)) => h,
            Some(None) => {
                warn!("WORKING_HOURS_START unparsable, defaulting to 0");
                0
            }
            None => 0,
        };
        let end_hour = match get("WORKING_HOURS_END").as_deref().map(parse_settings_hour) {
            Some(Some(h)) => h,
            Some(None) => {
                warn!("WORKING_HOURS_END unparsable, defaulting to 23");
                23
            }
            None => 23,
        };

        let min_delay_minutes = get("MIN_DELIVERY_DELAY_MINUTES")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|d| *d >= 0)
            .unwrap_or(DEFAULT_MIN_DELAY_MINUTES);

        let max_delivery_days = get("MAX_DELIVERY_DAYS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_DELIVERY_DAYS);

        let timezone = match get("STORE_TZ") {
            Some(raw) => raw.trim().parse::<Tz>().unwrap_or_else(|_| {
                warn!("Invalid STORE_TZ '{}', defaulting to UTC", raw);
                Tz::UTC
            }),
            None => Tz::UTC,
        };

        SchedulingConfig {
            working_hours: WorkingHours {
                start_hour,
                end_hour,
            },
            min_delay_minutes,
            max_delivery_days,
            timezone,
        }
    }

    /// Create config from a HashMap (convenience for testing)
    #[cfg(test)]
    pub fn from_map(map: &HashMap<&str, &str>) -> Self {
        Self::from_getter(|key| map.get(key).map(|v| v.to_string()))
    }

    /// Validate configuration values at startup.
    /// Returns Ok(()) if all validations pass, or Err with details of what failed.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.working_hours.start_hour > self.working_hours.end_hour {
            errors.push(format!(
                "WORKING_HOURS_START ({}) is after WORKING_HOURS_END ({}); no time can validate.",
                self.working_hours.start_hour, self.working_hours.end_hour
            ));
        }

        if self.max_delivery_days == 0 {
            errors.push("MAX_DELIVERY_DAYS must be at least 1 (1 means today only).".to_string());
        }

        if self.min_delay_minutes >= 24 * 60 {
            errors.push(format!(
                "MIN_DELIVERY_DELAY_MINUTES={} is a full day or more; same-day ordering can never succeed.",
                self.min_delay_minutes
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )
        }
    }

    /// Current wall-clock time on the store's clock. The scheduling core
    /// never reads the clock itself; callers pass this in so every check
    /// sees a fresh `now`.
    pub fn local_now(&self) -> NaiveDateTime {
        self.timezone
            .from_utc_datetime(&Utc::now().naive_utc())
            .naive_local()
    }
}

/// Parse the hour out of a settings value like "10:00". Only the leading
/// hour matters; anything non-numeric or out of range is rejected so the
/// caller can fall back to the permissive default.
fn parse_settings_hour(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let hour: u32 = digits.parse().ok()?;
    if hour > 23 {
        return None;
    }
    Some(hour)
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn past_close_consistent() {
        let end: u32 = kani::any();
        kani::assume(end < 24);
        let hour: u32 = kani::any();
        kani::assume(hour < 24);
        let minute: u32 = kani::any();
        kani::assume(minute < 60);

        let hours = WorkingHours {
            start_hour: 0,
            end_hour: end,
        };
        let expected = hour > end || (hour == end && minute > 0);
        kani::assert(
            hours.is_past_close(hour, minute) == expected,
            "close boundary must sit at end:00",
        );
    }
}
