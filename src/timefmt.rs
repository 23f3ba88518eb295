//! Shared time-formatting helpers for the scheduling engine

use chrono::{Duration, NaiveDateTime};

/// Zero-pad a raw text field to two digits ("9" → "09", "12" → "12").
/// Longer inputs pass through unchanged and fail the shape check downstream.
pub fn pad_two(text: &str) -> String {
    format!("{:0>2}", text.trim())
}

/// Format an hour/minute pair as "HH:MM"
pub fn format_hhmm(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Format the clock part of an instant as "HH:MM"
pub fn format_instant_hhmm(instant: NaiveDateTime) -> String {
    instant.format("%H:%M").to_string()
}

/// Strict 24-hour "HH:MM" parse: exactly two digit pairs separated by a
/// colon, hour 00-23, minute 00-59. Returns None on any deviation.
pub fn parse_hhmm(candidate: &str) -> Option<(u32, u32)> {
    let bytes = candidate.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return None;
    }
    let hour: u32 = candidate[0..2].parse().ok()?;
    let minute: u32 = candidate[3..5].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Format a wait duration for banners and logs
pub fn format_wait(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}



/// Kani formal verification proofs
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn hhmm_formatting_in_range() {
        let hour: u32 = kani::any();
        kani::assume(hour < 24);
        let minute: u32 = kani::any();
        kani::assume(minute < 60);

        let text = format_hhmm(hour, minute);
        kani::assert(text.len() == 5, "HH:MM is always five bytes");
    }
}
