//! View state owned by the calendar UI.

pub mod calendar;
