/// Picker Session State Machine - Stateright Model
/// Formally checks the date/time picker flow: pick date → type time → confirm
///
/// Run with: cargo test --release picker_model -- --nocapture

use chrono::{Duration, NaiveDate, NaiveDateTime};
use stateright::*;

use crate::calendar::is_date_available;
use crate::config::{SchedulingConfig, WorkingHours};
use crate::input::{sanitize_hours, sanitize_minutes};
use crate::validator::{confirm_selection, validate, ValidationState};

/// One open picker's transient state
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PickerState {
    pub selected: Option<NaiveDate>,
    pub hours_text: String,
    pub minutes_text: String,
    pub confirmed: bool,
}

/// Discrete UI events the session reacts to
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum PickerAction {
    PickDate(NaiveDate),
    TypeHourDigit(u8),
    TypeMinuteDigit(u8),
    BackspaceHours,
    BackspaceMinutes,
    Confirm,
}

/// Configuration for the model checker
#[derive(Clone)]
pub struct PickerChecker {
    pub config: SchedulingConfig,
    pub now: NaiveDateTime,
    /// Digits offered to the typing actions, kept small to bound the
    /// state space
    pub digits: Vec<u8>,
}

impl Default for PickerChecker {
    fn default() -> Self {
        let now = NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        Self {
            config: SchedulingConfig {
                working_hours: WorkingHours {
                    start_hour: 10,
                    end_hour: 22,
                },
                min_delay_minutes: 90,
                max_delivery_days: 3,
                ..SchedulingConfig::default()
            },
            now,
            digits: vec![0, 1, 2, 3, 9],
        }
    }
}

impl PickerChecker {
    /// Dates the model may click: yesterday, today, every day inside the
    /// look-ahead window, and the first day past it
    fn candidate_dates(&self) -> Vec<NaiveDate> {
        let today = self.now.date();
        let horizon = i64::from(self.config.max_delivery_days);
        (-1..=horizon).map(|d| today + Duration::days(d)).collect()
    }

    fn validation(&self, state: &PickerState) -> ValidationState {
        validate(
            state.selected,
            &state.hours_text,
            &state.minutes_text,
            self.now,
            &self.config,
        )
    }
}

impl Model for PickerChecker {
    type State = PickerState;
    type Action = PickerAction;

    fn init_states(&self) -> Vec<Self::State> {
        vec![PickerState {
            selected: None,
            hours_text: String::new(),
            minutes_text: String::new(),
            confirmed: false,
        }]
    }

    fn actions(&self, state: &Self::State, actions: &mut Vec<Self::Action>) {
        if state.confirmed {
            // Picker closed - no further events
            return;
        }

        for date in self.candidate_dates() {
            actions.push(PickerAction::PickDate(date));
        }
        for &d in &self.digits {
            actions.push(PickerAction::TypeHourDigit(d));
            actions.push(PickerAction::TypeMinuteDigit(d));
        }
        actions.push(PickerAction::BackspaceHours);
        actions.push(PickerAction::BackspaceMinutes);
        actions.push(PickerAction::Confirm);
    }

    fn next_state(&self, state: &Self::State, action: Self::Action) -> Option<Self::State> {
        let mut next = state.clone();

        match action {
            PickerAction::PickDate(date) => {
                next.selected = Some(date);
            }

            PickerAction::TypeHourDigit(d) => {
                let raw = format!("{}{}", state.hours_text, d);
                next.hours_text = sanitize_hours(&raw).text;
            }

            PickerAction::TypeMinuteDigit(d) => {
                let raw = format!("{}{}", state.minutes_text, d);
                next.minutes_text = sanitize_minutes(&raw).text;
            }

            PickerAction::BackspaceHours => {
                next.hours_text.pop();
            }

            PickerAction::BackspaceMinutes => {
                next.minutes_text.pop();
            }

            PickerAction::Confirm => {
                let result = confirm_selection(
                    state.selected,
                    &state.hours_text,
                    &state.minutes_text,
                    self.now,
                    &self.config,
                );
                if result.is_ok() {
                    next.confirmed = true;
                }
                // A refused confirmation leaves the picker open, unchanged
            }
        }

        Some(next)
    }

    fn properties(&self) -> Vec<Property<Self>> {
        vec![
            // Safety: confirmation only ever happens from a Valid triple
            Property::<Self>::always("confirm_only_from_valid", |model, state| {
                !state.confirmed || model.validation(state) == ValidationState::Valid
            }),
            // Safety: a confirmed session always has a date
            Property::<Self>::always("no_confirm_without_date", |_, state| {
                !state.confirmed || state.selected.is_some()
            }),
            // Safety: the text fields never hold an out-of-range value
            Property::<Self>::always("fields_stay_clamped", |_, state| {
                let hours_ok = state.hours_text.is_empty()
                    || state.hours_text.parse::<u32>().is_ok_and(|h| h <= 23);
                let minutes_ok = state.minutes_text.is_empty()
                    || state.minutes_text.parse::<u32>().is_ok_and(|m| m <= 59);
                hours_ok && minutes_ok
            }),
            // Safety: a date the calendar flags available is never rejected
            // outright; only the typed hour/minute can fail it
            Property::<Self>::always("available_date_never_structurally_rejected", |model, state| {
                match state.selected {
                    // Sanitized fields hold only clamped digits, so a date
                    // the calendar offered can fail on the chosen time
                    // (hours window, earliest instant) but never parse
                    Some(date) if is_date_available(date, model.now, &model.config) => {
                        model.validation(state) != ValidationState::Malformed
                    }
                    _ => true,
                }
            }),
            // Liveness: some interleaving reaches a confirmed order
            Property::<Self>::sometimes("confirmation_reachable", |_, state| state.confirmed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateright::Checker;

    #[test]
    fn picker_model_check_safety() {
        // Check all safety properties over the bounded session space
        let checker = PickerChecker::default().checker().spawn_bfs().join();

        println!("States explored: {}", checker.unique_state_count());

        checker.assert_properties();
    }

    #[test]
    fn picker_model_explores_many_states() {
        let checker = PickerChecker::default().checker().spawn_bfs().join();

        assert!(
            checker.unique_state_count() > 100,
            "Expected more than 100 states, got {}",
            checker.unique_state_count()
        );
    }

    #[test]
    fn picker_model_happy_path() {
        // Pick tomorrow, type 12:30, confirm
        let model = PickerChecker::default();
        let tomorrow = model.now.date() + Duration::days(1);

        let mut state = model.init_states()[0].clone();
        assert!(!state.confirmed);

        state = model
            .next_state(&state, PickerAction::PickDate(tomorrow))
            .unwrap();
        assert_eq!(state.selected, Some(tomorrow));

        for action in [
            PickerAction::TypeHourDigit(1),
            PickerAction::TypeHourDigit(2),
            PickerAction::TypeMinuteDigit(3),
            PickerAction::TypeMinuteDigit(0),
        ] {
            state = model.next_state(&state, action).unwrap();
        }
        assert_eq!(state.hours_text, "12");
        assert_eq!(state.minutes_text, "30");

        state = model.next_state(&state, PickerAction::Confirm).unwrap();
        assert!(state.confirmed);
    }

    #[test]
    fn picker_model_refused_confirm_keeps_session_open() {
        let model = PickerChecker::default();

        // Confirm with nothing selected: session stays open, unchanged
        let state = model.init_states()[0].clone();
        let after = model.next_state(&state, PickerAction::Confirm).unwrap();
        assert!(!after.confirmed);
        assert_eq!(after, state);
    }

    #[test]
    fn picker_model_fast_typing_clamps() {
        let model = PickerChecker::default();
        let mut state = model.init_states()[0].clone();

        state = model
            .next_state(&state, PickerAction::TypeHourDigit(9))
            .unwrap();
        state = model
            .next_state(&state, PickerAction::TypeHourDigit(9))
            .unwrap();
        assert_eq!(state.hours_text, "23");
    }
}
