//! Field rules for task bodies.
//!
//! Rules run in a fixed order and the first violation is reported. Success
//! yields [`TaskFields`] with trimmed text and typed enumerations.

use thiserror::Error;
use validator::ValidateLength;

use crate::models::{TaskFields, TaskPayload, TaskPriority, TaskStatus};

pub const TITLE_MAX_CHARS: u64 = 100;
pub const DESCRIPTION_MAX_CHARS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Title must be less than 100 characters")]
    TitleTooLong,

    #[error("Description must be less than 500 characters")]
    DescriptionTooLong,

    #[error("Invalid status")]
    InvalidStatus,

    #[error("Invalid priority")]
    InvalidPriority,
}

pub fn validate_task(payload: &TaskPayload) -> Result<TaskFields, ValidationError> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or(ValidationError::TitleRequired)?
        .to_string();
    if !title.validate_length(None, Some(TITLE_MAX_CHARS), None) {
        return Err(ValidationError::TitleTooLong);
    }

    let description = payload.description.as_deref().map(|d| d.trim().to_string());
    if let Some(description) = &description {
        if !description.validate_length(None, Some(DESCRIPTION_MAX_CHARS), None) {
            return Err(ValidationError::DescriptionTooLong);
        }
    }

    let status = payload
        .status
        .as_deref()
        .map(|s| s.parse::<TaskStatus>().map_err(|_| ValidationError::InvalidStatus))
        .transpose()?;
    let priority = payload
        .priority
        .as_deref()
        .map(|p| p.parse::<TaskPriority>().map_err(|_| ValidationError::InvalidPriority))
        .transpose()?;

    Ok(TaskFields {
        title,
        description,
        status,
        priority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn titled(title: &str) -> TaskPayload {
        TaskPayload {
            title: Some(title.to_string()),
            ..TaskPayload::default()
        }
    }

    #[rstest]
    #[case::exactly_at_limit(100, true)]
    #[case::one_over(101, false)]
    #[case::single_char(1, true)]
    fn title_length_boundary(#[case] len: usize, #[case] accepted: bool) {
        let result = validate_task(&titled(&"x".repeat(len)));
        if accepted {
            assert_eq!(result.map(|f| f.title.len()), Ok(len));
        } else {
            assert_eq!(result, Err(ValidationError::TitleTooLong));
        }
    }

    #[rstest]
    #[case::missing(None)]
    #[case::empty(Some(""))]
    #[case::whitespace(Some("   \t\n"))]
    fn blank_title_is_rejected(#[case] title: Option<&str>) {
        let payload = TaskPayload {
            title: title.map(str::to_string),
            ..TaskPayload::default()
        };
        assert_eq!(validate_task(&payload), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn title_is_trimmed_before_measuring() {
        let padded = format!("  {}  ", "y".repeat(100));
        let fields = validate_task(&titled(&padded)).unwrap();
        assert_eq!(fields.title, "y".repeat(100));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let fields = validate_task(&titled(&"é".repeat(100))).unwrap();
        assert_eq!(fields.title.chars().count(), 100);
    }

    #[test]
    fn description_limit() {
        let mut payload = titled("t");
        payload.description = Some("d".repeat(500));
        assert!(validate_task(&payload).is_ok());

        payload.description = Some("d".repeat(501));
        assert_eq!(validate_task(&payload), Err(ValidationError::DescriptionTooLong));
    }

    #[test]
    fn enumerations_are_parsed() {
        let payload = TaskPayload {
            title: Some("t".into()),
            description: Some("  notes ".into()),
            status: Some("in_progress".into()),
            priority: Some("high".into()),
        };
        assert_eq!(
            validate_task(&payload),
            Ok(TaskFields {
                title: "t".into(),
                description: Some("notes".into()),
                status: Some(TaskStatus::InProgress),
                priority: Some(TaskPriority::High),
            })
        );
    }

    #[rstest]
    #[case::bad_status(Some("done"), None, ValidationError::InvalidStatus)]
    #[case::bad_priority(None, Some("urgent"), ValidationError::InvalidPriority)]
    #[case::status_checked_first(Some("done"), Some("urgent"), ValidationError::InvalidStatus)]
    fn unknown_enum_values(
        #[case] status: Option<&str>,
        #[case] priority: Option<&str>,
        #[case] expected: ValidationError,
    ) {
        let payload = TaskPayload {
            title: Some("t".into()),
            description: None,
            status: status.map(str::to_string),
            priority: priority.map(str::to_string),
        };
        assert_eq!(validate_task(&payload), Err(expected));
    }

    #[test]
    fn first_failing_rule_wins() {
        let payload = TaskPayload {
            title: Some(" ".into()),
            description: Some("d".repeat(600)),
            status: Some("nope".into()),
            priority: Some("nope".into()),
        };
        assert_eq!(validate_task(&payload), Err(ValidationError::TitleRequired));
    }
}
