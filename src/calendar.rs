//! Calendar range builder
//! Produces the month grid shown by the delivery-date picker and decides
//! which dates are selectable within the look-ahead window.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::availability::is_today_orderable;
use crate::config::SchedulingConfig;

/// One cell of the month grid. `date` is None for the padding cells that
/// align the 1st onto its weekday column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Option<NaiveDate>,
    pub is_available: bool,
    pub is_selected: bool,
}

impl CalendarDay {
    fn padding() -> Self {
        Self {
            date: None,
            is_available: false,
            is_selected: false,
        }
    }
}

/// Direction of month navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Prev,
    Next,
}

/// One visible month of the picker, identified by year and 1-based month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Lazy, restartable walk over the month's cells: Monday-first leading
    /// padding, then one cell per day. Invalid year/month yields nothing.
    pub fn days(
        &self,
        now: NaiveDateTime,
        config: &SchedulingConfig,
        selected: Option<NaiveDate>,
    ) -> impl Iterator<Item = CalendarDay> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let padding = first.map_or(0, |d| d.weekday().num_days_from_monday());
        let day_count = first.map_or(0, days_in_month);
        let config = config.clone();

        (0..padding).map(|_| CalendarDay::padding()).chain(
            (0..day_count).filter_map(move |offset| {
                let date = first? + Duration::days(i64::from(offset));
                Some(CalendarDay {
                    date: Some(date),
                    is_available: is_date_available(date, now, &config),
                    is_selected: selected == Some(date),
                })
            }),
        )
    }
}

/// Whether `date` may be chosen as a delivery date, seen from `now`.
/// Past dates never; today only if same-day ordering is still possible;
/// future dates only inside the look-ahead window (`max_delivery_days`
/// counts today, so 1 means today only).
pub fn is_date_available(date: NaiveDate, now: NaiveDateTime, config: &SchedulingConfig) -> bool {
    let today = now.date();
    if date < today {
        return false;
    }
    if date == today {
        return is_today_orderable(now, config.working_hours, config.min_delay_minutes);
    }
    let horizon = today + Duration::days(i64::from(config.max_delivery_days.saturating_sub(1)));
    date <= horizon
}

/// Shift the picker cursor one calendar month.
///
/// Keeps the cursor's day-of-month and lets it roll into the following
/// month when the target month is shorter (Jan 31 → "Feb 31" → Mar 2/3),
/// matching the storefront's native month arithmetic.
pub fn change_month(cursor: NaiveDate, step: MonthStep) -> NaiveDate {
    let delta: i32 = match step {
        MonthStep::Prev => -1,
        MonthStep::Next => 1,
    };
    let zero_based = cursor.year() * 12 + cursor.month() as i32 - 1 + delta;
    let (year, month) = (zero_based.div_euclid(12), zero_based.rem_euclid(12) as u32 + 1);

    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(first) => first + Duration::days(i64::from(cursor.day()) - 1),
        None => cursor,
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = change_month(first, MonthStep::Next);
    (next - first).num_days() as u32
}
