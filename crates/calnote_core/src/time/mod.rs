//! Calendar arithmetic: period boundaries, week conventions and pattern
//! rendering.
//!
//! # Responsibility
//! - Keep every date computation pure and `chrono`-backed.
//! - Thread the week convention through explicitly instead of reading a
//!   global locale.

pub mod boundary;
pub mod clock;
pub mod format;
pub mod locale;
