//! Time validator
//! Checks a typed hour/minute pair against the working-hours window and,
//! for same-day orders, against the earliest deliverable instant.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::availability::earliest_delivery_instant;
use crate::config::SchedulingConfig;
use crate::timefmt::{format_hhmm, pad_two, parse_hhmm};

/// Outcome of validating the current input triple. Recomputed from scratch
/// on every change to the date or either text field; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// No input yet (blank field or no date picked); nothing to show
    Empty,
    /// Input does not parse as a 24-hour HH:MM time
    Malformed,
    /// Valid time outside the store's daily window
    OutsideWorkingHours,
    /// Valid, in-hours time for today that precedes the earliest
    /// deliverable instant
    TooEarly { earliest: NaiveDateTime },
    Valid,
}

/// Why a confirmation attempt was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Select a delivery date")]
    MissingDate,
    #[error("Enter a delivery time")]
    MissingTime,
    #[error("Enter a valid time in HH:MM format")]
    Malformed,
    #[error("The store is closed at that time")]
    OutsideWorkingHours,
    #[error("Earliest delivery today is {}", .earliest.format("%H:%M"))]
    TooEarly { earliest: NaiveDateTime },
}

/// The validated selection handed to the order-submission flow.
/// Built only after validation passes; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverySelection {
    /// ISO calendar date, YYYY-MM-DD
    pub date: String,
    /// Zero-padded 24-hour time, HH:MM
    pub time: String,
    pub datetime: NaiveDateTime,
}

/// Validate the current `(date, hours text, minutes text)` triple as of
/// `now`.
///
/// Blank input or a missing date is `Empty`, not an error: no message is
/// shown until the user has typed something against a chosen date. The
/// working-hours check applies uniformly to every day including today;
/// the earliest-instant check applies to today only.
pub fn validate(
    selected_date: Option<NaiveDate>,
    hours_text: &str,
    minutes_text: &str,
    now: NaiveDateTime,
    config: &SchedulingConfig,
) -> ValidationState {
    if hours_text.trim().is_empty() || minutes_text.trim().is_empty() {
        return ValidationState::Empty;
    }
    let Some(date) = selected_date else {
        return ValidationState::Empty;
    };

    let candidate = format!("{}:{}", pad_two(hours_text), pad_two(minutes_text));
    let Some((hours, minutes)) = parse_hhmm(&candidate) else {
        return ValidationState::Malformed;
    };
    // parse_hhmm already range-checks; keep the guard against future edits
    if hours > 23 || minutes > 59 {
        return ValidationState::Malformed;
    }

    if !config.working_hours.contains(hours, minutes) {
        return ValidationState::OutsideWorkingHours;
    }

    if date == now.date() {
        let earliest = earliest_delivery_instant(now, config.min_delay_minutes);
        match date.and_hms_opt(hours, minutes, 0) {
            Some(chosen) if chosen < earliest => {
                return ValidationState::TooEarly { earliest };
            }
            Some(_) => {}
            None => return ValidationState::Malformed,
        }
    }

    ValidationState::Valid
}

/// Build the final selection, or explain why it cannot be built yet.
/// Never produces a `DeliverySelection` from anything but a `Valid`
/// triple; closing the picker on success is the caller's job.
pub fn confirm_selection(
    selected_date: Option<NaiveDate>,
    hours_text: &str,
    minutes_text: &str,
    now: NaiveDateTime,
    config: &SchedulingConfig,
) -> Result<DeliverySelection, SelectionError> {
    let date = selected_date.ok_or(SelectionError::MissingDate)?;
    if hours_text.trim().is_empty() || minutes_text.trim().is_empty() {
        return Err(SelectionError::MissingTime);
    }

    match validate(selected_date, hours_text, minutes_text, now, config) {
        ValidationState::Valid => {}
        ValidationState::Malformed => return Err(SelectionError::Malformed),
        ValidationState::OutsideWorkingHours => return Err(SelectionError::OutsideWorkingHours),
        ValidationState::TooEarly { earliest } => {
            return Err(SelectionError::TooEarly { earliest })
        }
        // Both fields are non-blank and the date is set, so Empty cannot
        // occur; treat it as missing input all the same
        ValidationState::Empty => return Err(SelectionError::MissingTime),
    }

    let candidate = format!("{}:{}", pad_two(hours_text), pad_two(minutes_text));
    let (hours, minutes) = parse_hhmm(&candidate).ok_or(SelectionError::Malformed)?;
    let datetime = date
        .and_hms_opt(hours, minutes, 0)
        .ok_or(SelectionError::Malformed)?;

    Ok(DeliverySelection {
        date: date.format("%Y-%m-%d").to_string(),
        time: format_hhmm(hours, minutes),
        datetime,
    })
}
