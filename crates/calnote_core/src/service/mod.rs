//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate vault and host calls into use-case level APIs.
//! - Keep UI and host layers decoupled from storage details.

pub mod note_service;
pub mod open_service;
pub mod settings_service;
