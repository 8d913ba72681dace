//! Domain model for periodic notes and calendar settings.
//!
//! # Responsibility
//! - Define the period vocabulary shared by resolvers, services and the
//!   navigation store.
//! - Own the settings shape and its persisted (camelCase) layout.
//!
//! # Invariants
//! - A periodic note has no record of its own; its identity is the path
//!   derived from `(folder, format, date)`.

pub mod period;
pub mod settings;
