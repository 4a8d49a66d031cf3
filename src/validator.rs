//! Field validators and server error formatting
//!
//! Every validator is a pure function returning `Ok(())` or the
//! `FieldError` to show next to the field. Forms compose them per field.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use pedigree_types::ErrorPayload;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\w!#$%&'*+/=?`{|}~^-]+(?:\.[\w!#$%&'*+/=?`{|}~^-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,6}$",
    )
    .unwrap()
});

/// A single field-level validation failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("is required")]
    Required,

    #[error("must not consist of whitespace only")]
    Blank,

    #[error("must not be in the future")]
    DateInFuture,

    #[error("is not a valid e-mail address")]
    InvalidEmail,

    #[error("must be greater than 0")]
    NotPositive,
}

pub type FieldResult = Result<(), FieldError>;

/// Required free text: fails when empty or whitespace only
pub fn required_text(value: &str) -> FieldResult {
    if value.is_empty() {
        Err(FieldError::Required)
    } else if value.trim().is_empty() {
        Err(FieldError::Blank)
    } else {
        Ok(())
    }
}

/// Optional free text: empty means absent, whitespace only is invalid
pub fn optional_text(value: &str) -> FieldResult {
    if !value.is_empty() && value.trim().is_empty() {
        Err(FieldError::Blank)
    } else {
        Ok(())
    }
}

pub fn required<T>(value: &Option<T>) -> FieldResult {
    value.as_ref().map(|_| ()).ok_or(FieldError::Required)
}

/// Fails when the start of `date` lies strictly after `now`
pub fn no_date_in_future(date: NaiveDate, now: DateTime<Utc>) -> FieldResult {
    let start_of_day = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    match start_of_day {
        Some(moment) if moment > now => Err(FieldError::DateInFuture),
        _ => Ok(()),
    }
}

/// Optional e-mail: empty is fine, anything else must look like an address
pub fn email(value: &str) -> FieldResult {
    let value = value.trim();
    if value.is_empty() || EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

pub fn positive(value: i64) -> FieldResult {
    if value > 0 {
        Ok(())
    } else {
        Err(FieldError::NotPositive)
    }
}

/// Render a structured server error as the message followed by a bulleted
/// list of its sub-errors.
pub fn format_error_with_list(payload: &ErrorPayload) -> String {
    let mut message = payload.message.clone();
    if !payload.errors.is_empty() {
        message.push_str("\n\n");
        let items: Vec<String> = payload.errors.iter().map(|e| format!("- {}", e)).collect();
        message.push_str(&items.join("\n"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text(""), Err(FieldError::Required));
        assert_eq!(required_text("   \t"), Err(FieldError::Blank));
        assert_eq!(required_text(" Thunder "), Ok(()));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(""), Ok(()));
        assert_eq!(optional_text("  "), Err(FieldError::Blank));
        assert_eq!(optional_text("bay"), Ok(()));
    }

    #[test]
    fn test_today_is_not_in_future() {
        let now = noon(2024, 5, 1);
        assert_eq!(
            no_date_in_future(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), now),
            Ok(())
        );
        assert_eq!(
            no_date_in_future(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(), now),
            Err(FieldError::DateInFuture)
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(email(""), Ok(()));
        assert_eq!(email("anna.berg@stable.at"), Ok(()));
        assert_eq!(email("anna@"), Err(FieldError::InvalidEmail));
        assert_eq!(email("no at sign"), Err(FieldError::InvalidEmail));
    }

    #[test]
    fn test_format_error_with_list() {
        let payload = ErrorPayload::new(
            "Validation of horse failed",
            vec!["Name missing".into(), "Sex missing".into()],
        );
        assert_eq!(
            format_error_with_list(&payload),
            "Validation of horse failed\n\n- Name missing\n- Sex missing"
        );

        let bare = ErrorPayload::new("Not found", vec![]);
        assert_eq!(format_error_with_list(&bare), "Not found");
    }

    proptest! {
        #[test]
        fn prop_dates_after_now_are_rejected(days in 1i64..20_000) {
            let now = noon(2024, 5, 1);
            let date = (now + Duration::days(days)).date_naive();
            prop_assert_eq!(no_date_in_future(date, now), Err(FieldError::DateInFuture));
        }

        #[test]
        fn prop_dates_up_to_now_are_accepted(days in 0i64..50_000) {
            let now = noon(2024, 5, 1);
            let date = (now - Duration::days(days)).date_naive();
            prop_assert_eq!(no_date_in_future(date, now), Ok(()));
        }

        #[test]
        fn prop_whitespace_only_is_never_valid(ws in "[ \t\n]{1,12}") {
            prop_assert!(required_text(&ws).is_err());
        }
    }
}
