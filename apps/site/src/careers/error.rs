use thiserror::Error;

/// Failure to turn one content file into a `CareerRecord`.
///
/// Only the first violation is reported; validation never aggregates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CareerError {
    /// The file is not well-formed YAML (or not UTF-8). `detail` carries the
    /// parser's own message for logs; the display text stays opaque.
    #[error("malformed content")]
    Syntax { detail: String },

    #[error("{0}")]
    Schema(String),

    #[error("date format invalid: '{value}' must be YYYY-MM-DD")]
    DateFormat { value: String },

    #[error("{path}: value must be of type boolean")]
    Type { path: String },

    #[error("no content file found for career id '{id}'")]
    NotFound { id: String },

    #[error("cannot read {path}: {reason}")]
    Io { path: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerErrorKind {
    Syntax,
    Schema,
    DateFormat,
    Type,
    NotFound,
    Io,
}

impl CareerError {
    pub fn kind(&self) -> CareerErrorKind {
        match self {
            CareerError::Syntax { .. } => CareerErrorKind::Syntax,
            CareerError::Schema(_) => CareerErrorKind::Schema,
            CareerError::DateFormat { .. } => CareerErrorKind::DateFormat,
            CareerError::Type { .. } => CareerErrorKind::Type,
            CareerError::NotFound { .. } => CareerErrorKind::NotFound,
            CareerError::Io { .. } => CareerErrorKind::Io,
        }
    }

    /// True when a page for this id should be treated as nonexistent:
    /// the file is missing or its content does not validate.
    pub fn is_missing_record(&self) -> bool {
        !matches!(self.kind(), CareerErrorKind::Io)
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        CareerError::Schema(format!("required field '{field}' not found"))
    }

    pub(crate) fn missing_field_at(path: &str, field: &str) -> Self {
        CareerError::Schema(format!("{path}: required field '{field}' not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_format_message() {
        let err = CareerError::DateFormat {
            value: "2025/04/13".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "date format invalid: '2025/04/13' must be YYYY-MM-DD"
        );
    }

    #[test]
    fn test_syntax_message_is_opaque() {
        let err = CareerError::Syntax {
            detail: "did not find expected key at line 3".to_string(),
        };
        assert_eq!(err.to_string(), "malformed content");
    }

    #[test]
    fn test_missing_field_messages() {
        assert_eq!(
            CareerError::missing_field("title").to_string(),
            "required field 'title' not found"
        );
        assert_eq!(
            CareerError::missing_field_at("sections[2].items[0]", "key").to_string(),
            "sections[2].items[0]: required field 'key' not found"
        );
    }

    #[test]
    fn test_missing_record_classification() {
        assert!(CareerError::NotFound { id: "x".into() }.is_missing_record());
        assert!(CareerError::Schema("bad".into()).is_missing_record());
        assert!(CareerError::Type { path: "p".into() }.is_missing_record());
        assert!(!CareerError::Io {
            path: "p".into(),
            reason: "denied".into()
        }
        .is_missing_record());
    }
}
