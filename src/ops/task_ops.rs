use chrono::NaiveDate;

use crate::model::task::normalize_tags;

/// Rejections for edit-buffer input, caught before anything reaches the store
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Due dates are shown and typed as `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date (zero-padded month and day).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Trim a title buffer, rejecting blank input
pub fn validate_title(buffer: &str) -> Result<String, TaskError> {
    let title = buffer.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Split a comma-separated tag buffer. An empty buffer yields no tags.
pub fn parse_tags(buffer: &str) -> Vec<String> {
    normalize_tags(buffer.split(','))
}

/// Join tags for seeding the tag editor
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Parse the due-date buffer: empty clears the date, anything else must be
/// a valid `YYYY-MM-DD`.
pub fn parse_due(buffer: &str) -> Result<Option<NaiveDate>, TaskError> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed)
        .map(Some)
        .ok_or_else(|| TaskError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_date_accepts_iso() {
        assert_eq!(parse_date("2024-06-01"), Some(date(2024, 6, 1)));
    }

    #[test]
    fn parse_date_rejects_unpadded_and_garbage() {
        assert_eq!(parse_date("2024-6-1"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date("+024-06-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn format_date_round_trips() {
        assert_eq!(format_date(date(2024, 1, 9)), "2024-01-09");
    }

    #[test]
    fn validate_title_trims() {
        assert_eq!(validate_title("  Write spec "), Ok("Write spec".to_string()));
        assert_eq!(validate_title("   "), Err(TaskError::EmptyTitle));
        assert_eq!(validate_title(""), Err(TaskError::EmptyTitle));
    }

    #[test]
    fn parse_tags_normalizes() {
        assert_eq!(parse_tags("Bug, bug ,URGENT,,"), vec!["bug", "urgent"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn join_tags_matches_editor_seed() {
        assert_eq!(join_tags(&["a".into(), "b".into()]), "a, b");
        assert_eq!(join_tags(&[]), "");
    }

    #[test]
    fn parse_due_empty_clears() {
        assert_eq!(parse_due(""), Ok(None));
        assert_eq!(parse_due("   "), Ok(None));
    }

    #[test]
    fn parse_due_valid_and_invalid() {
        assert_eq!(parse_due(" 2024-05-30 "), Ok(Some(date(2024, 5, 30))));
        assert_eq!(
            parse_due("next week"),
            Err(TaskError::InvalidDate("next week".into()))
        );
    }
}
