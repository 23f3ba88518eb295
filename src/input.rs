//! Keystroke-level sanitation for the hour/minute text fields.
//! Each edit re-runs these pure functions; the UI replaces the field's
//! contents with `text` and moves focus when asked to.

/// Result of sanitizing one field edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub text: String,
    /// Hour field only: move focus to the minute field
    pub advance_focus: bool,
}

/// Sanitize the hour field after an edit: strip non-digits, keep at most
/// two, clamp the value to 23. Focus advances once two digits are shown,
/// so fast typing like "99" lands as "23" and jumps to minutes.
pub fn sanitize_hours(raw: &str) -> FieldUpdate {
    let text = clamp_digits(raw, 23);
    let advance_focus = text.len() == 2;
    FieldUpdate {
        text,
        advance_focus,
    }
}

/// Sanitize the minute field after an edit: strip non-digits, keep at most
/// two, clamp the value to 59. Minutes never move focus forward.
pub fn sanitize_minutes(raw: &str) -> FieldUpdate {
    FieldUpdate {
        text: clamp_digits(raw, 59),
        advance_focus: false,
    }
}

/// Backspace in an empty minute field sends focus back to the hour field
pub fn minutes_backspace_returns_focus(minutes_text: &str) -> bool {
    minutes_text.is_empty()
}

fn clamp_digits(raw: &str, max: u32) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(2).collect();
    if digits.is_empty() {
        return digits;
    }
    match digits.parse::<u32>() {
        Ok(value) if value > max => max.to_string(),
        Ok(_) => digits,
        // Unreachable for one or two ascii digits; keep the field usable
        Err(_) => String::new(),
    }
}
