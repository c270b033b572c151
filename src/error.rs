//! Error types for heroclash.
//!
//! All errors are strongly typed using thiserror. The split mirrors the
//! request boundary: validation errors are raised before any lookup happens,
//! execution errors after. Malformed powerstat data is never an error; it
//! degrades to zero inside the comparison engine.

use thiserror::Error;

use crate::hero::HeroId;
use crate::session::SessionId;

/// Validation errors: the request itself is malformed ("invalid request").
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required identifier '{field}' is missing")]
    MissingId {
        field: String,
    },

    #[error("Identifier '{field}' must be a positive integer, got {value:?}")]
    InvalidId {
        field: String,
        value: String,
    },

    #[error("Invalid session id: {value:?}")]
    InvalidSessionId {
        value: String,
    },

    #[error("Invalid selection: {reason}")]
    InvalidSelection {
        reason: String,
    },

    #[error("Malformed request: {reason}")]
    MalformedRequest {
        reason: String,
    },
}

/// Execution errors that occur after a request passed validation.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Superhero not found: {id}")]
    HeroNotFound {
        id: HeroId,
    },

    #[error("One or both superheroes not found: {}", format_ids(.missing))]
    ComparisonHeroesNotFound {
        missing: Vec<HeroId>,
    },

    #[error("Selection holds {selected} of 2 superheroes; comparison needs exactly 2")]
    SelectionIncomplete {
        selected: usize,
    },

    #[error("Session not found: {id}")]
    SessionNotFound {
        id: SessionId,
    },

    #[error("Session limit exceeded (max: {max})")]
    SessionLimitExceeded {
        max: usize,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
    },
}

fn format_ids(ids: &[HeroId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Configuration errors raised while assembling the server configuration.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{flag} requires a value")]
    MissingValue {
        flag: String,
    },

    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Top-level error type for heroclash.
#[derive(Debug, Error)]
pub enum HeroError {
    /// The request was malformed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request was well-formed but could not be carried out.
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// An invariant of the process itself was broken (e.g. a poisoned lock).
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl HeroError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is an invalid-request error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if a hero or session lookup failed.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Execution(
                ExecutionError::HeroNotFound { .. }
                    | ExecutionError::ComparisonHeroesNotFound { .. }
                    | ExecutionError::SessionNotFound { .. }
            )
        )
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for heroclash operations.
pub type HeroResult<T> = Result<T, HeroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_invalid_id() {
        let err = ValidationError::InvalidId {
            field: "id1".to_string(),
            value: "abc".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("id1"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_malformed_request_is_validation() {
        let err: HeroError = ValidationError::MalformedRequest {
            reason: "hero_id: invalid value: integer `-1`".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Malformed request: hero_id"));
    }

    #[test]
    fn test_execution_error_missing_heroes_lists_ids() {
        let err = ExecutionError::ComparisonHeroesNotFound {
            missing: vec![HeroId::new(7), HeroId::new(999)],
        };
        let msg = format!("{err}");
        assert!(msg.contains("One or both superheroes not found"));
        assert!(msg.contains("7, 999"));
    }

    #[test]
    fn test_execution_error_selection_incomplete() {
        let err = ExecutionError::SelectionIncomplete { selected: 1 };
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn test_hero_error_from_validation() {
        let err: HeroError = ValidationError::MissingId {
            field: "id2".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_hero_error_not_found_kinds() {
        let single: HeroError = ExecutionError::HeroNotFound { id: HeroId::new(3) }.into();
        assert!(single.is_not_found());
        assert!(single.is_execution());

        let pair: HeroError = ExecutionError::ComparisonHeroesNotFound {
            missing: vec![HeroId::new(3)],
        }
        .into();
        assert!(pair.is_not_found());

        let limit: HeroError = ExecutionError::SessionLimitExceeded { max: 4 }.into();
        assert!(!limit.is_not_found());
    }

    #[test]
    fn test_hero_error_internal() {
        let err = HeroError::internal("unexpected state");
        assert!(err.is_internal());
        assert!(format!("{err}").contains("unexpected state"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingValue {
            flag: "--port".to_string(),
        };
        assert_eq!(err.to_string(), "--port requires a value");
    }
}
