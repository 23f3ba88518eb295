//! Availability calculator
//! Decides whether same-day ordering is still possible given the store's
//! working hours and the minimum preparation delay.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::config::{SchedulingConfig, WorkingHours};

/// Earliest instant an order placed at `now` can be delivered:
/// `now + min_delay_minutes`, truncated to whole minutes.
pub fn earliest_delivery_instant(now: NaiveDateTime, min_delay_minutes: i64) -> NaiveDateTime {
    let shifted = now + Duration::minutes(min_delay_minutes);
    shifted
        .date()
        .and_hms_opt(shifted.hour(), shifted.minute(), 0)
        .unwrap_or(shifted)
}

/// Check whether an order placed at `now` can still be delivered today.
///
/// False when the preparation delay pushes the earliest instant past the
/// close of the working-hours window (which shuts at `end_hour:00`), or
/// past midnight. The start of the window is deliberately not checked
/// here; a too-early typed time is caught by the per-time validation.
pub fn is_today_orderable(now: NaiveDateTime, hours: WorkingHours, min_delay_minutes: i64) -> bool {
    let earliest = earliest_delivery_instant(now, min_delay_minutes);

    if hours.is_past_close(earliest.hour(), earliest.minute()) {
        return false;
    }

    // Delay crossed midnight: "today" no longer exists for this order
    if earliest.date() != now.date() {
        return false;
    }

    true
}

/// Convenience wrapper reading the store clock. Callers inside a validation
/// pass must use [`is_today_orderable`] with the `now` they already hold.
pub fn is_today_orderable_now(config: &SchedulingConfig) -> bool {
    is_today_orderable(
        config.local_now(),
        config.working_hours,
        config.min_delay_minutes,
    )
}

/// Wait until the ordering window next opens.
/// Returns None while the window is open at `now`, otherwise the time
/// remaining until `start_hour:00` today or tomorrow. Drives the
/// closed-hours banner in the storefront.
pub fn time_until_open(now: NaiveDateTime, hours: WorkingHours) -> Option<Duration> {
    if hours.contains(now.hour(), now.minute()) {
        return None;
    }

    let opens_today = now
        .date()
        .and_hms_opt(hours.start_hour, 0, 0)
        .unwrap_or(now);
    let next_open = if now < opens_today {
        opens_today
    } else {
        opens_today + Duration::days(1)
    };
    Some(next_open - now)
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn orderable_requires_open_close_boundary() {
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
        // An instant past end:00 can never count as orderable
        if hour > end || (hour == end && minute > 0) {
            kani::assert(
                hours.is_past_close(hour, minute),
                "past-close instants must be rejected",
            );
        }
    }
}
