//! Vault path normalization and periodic-note path derivation.
//!
//! # Invariants
//! - `resolve_path` is pure: same folder, pattern, date and convention give
//!   the same path, and two dates share a path exactly when they render to
//!   the same stem.
//! - Normalized paths contain no empty, `.` or `..` segments, so a rendered
//!   stem cannot climb out of its folder.

use crate::model::settings::PeriodicNoteConfig;
use crate::time::format::format_date;
use crate::time::locale::WeekConvention;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

const NOTE_EXTENSION: &str = "md";

static SEPARATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\\/]+").expect("valid separator regex"));

/// Normalizes a vault path.
///
/// Rules:
/// - `\` and `/` runs collapse into one `/`.
/// - Leading/trailing separators, `.` and `..` segments are dropped.
/// - Non-breaking spaces become plain spaces.
/// - An empty result is the vault root, `/`.
pub fn normalize_path(path: &str) -> String {
    let spaced = path.replace(['\u{00A0}', '\u{202F}'], " ");
    let unified = SEPARATOR_RUN_RE.replace_all(&spaced, "/");
    let normalized = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/");
    if normalized.is_empty() {
        "/".to_string()
    } else {
        normalized
    }
}

/// Derives the note path for `date` from a folder and a date pattern.
///
/// The stem is `date` rendered with `format`; the folder is omitted when it
/// is empty.
pub fn resolve_path(
    folder: &str,
    format: &str,
    date: NaiveDateTime,
    week: WeekConvention,
) -> String {
    let stem = format_date(date, format, week);
    let joined = if folder.is_empty() {
        format!("{stem}.{NOTE_EXTENSION}")
    } else {
        format!("{folder}/{stem}.{NOTE_EXTENSION}")
    };
    normalize_path(&joined)
}

/// Derives the note path for `date` under one periodic-note config.
pub fn resolve_note_path(
    config: &PeriodicNoteConfig,
    date: NaiveDateTime,
    week: WeekConvention,
) -> String {
    resolve_path(&config.folder, &config.format, date, week)
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn collapses_and_trims_separators() {
        assert_eq!(normalize_path("//notes\\\\daily//x.md/"), "notes/daily/x.md");
        assert_eq!(normalize_path("notes/./../x.md"), "notes/x.md");
    }

    #[test]
    fn empty_path_is_root() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn non_breaking_spaces_are_plain() {
        assert_eq!(normalize_path("my\u{00A0}notes/a.md"), "my notes/a.md");
    }
}
