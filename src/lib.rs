//! Orderwindow library - delivery scheduling engine
//!
//! Pure date/time logic behind the storefront's delivery picker: same-day
//! availability, the selectable-date calendar, and typed-time validation.
//! Every check takes `now` as an explicit parameter so results stay fresh
//! and deterministic under test.

pub mod availability;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod input;
pub mod timefmt;
pub mod validator;

#[cfg(test)]
mod model;
