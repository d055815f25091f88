//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every per-request failure the engine and its collaborators can report.

use thiserror::Error;

use crate::models::ClockSlot;

/// The main error type for the payroll engine.
///
/// None of these errors is fatal to the process; each one is a per-request
/// failure returned to the caller, who decides whether to retry.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
/// use payroll_engine::models::ClockSlot;
///
/// let error = EngineError::DuplicatePunch {
///     slot: ClockSlot::MorningIn,
/// };
/// assert_eq!(error.to_string(), "Already recorded for this slot (morningIn).");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A punch was attempted before the punch it depends on.
    #[error("You must clock in ({required}) first.")]
    SequenceViolation {
        /// The slot that was rejected.
        slot: ClockSlot,
        /// The slot (or slots) that must be recorded first.
        required: String,
    },

    /// The slot already holds a timestamp; punches are write-once.
    #[error("Already recorded for this slot ({slot}).")]
    DuplicatePunch {
        /// The slot that was already recorded.
        slot: ClockSlot,
    },

    /// No user exists with the given id.
    #[error("User not found: {id}")]
    UserNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A user record failed validation.
    #[error("Invalid user field '{field}': {message}")]
    InvalidUser {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Another user already holds the requested PIN.
    #[error("PIN {pin} is already assigned to another user")]
    PinConflict {
        /// The conflicting PIN.
        pin: String,
    },

    /// Admin accounts cannot be deleted.
    #[error("Admin user '{id}' cannot be deleted")]
    AdminDeletion {
        /// The id of the admin user.
        id: String,
    },

    /// A payroll extras row failed validation.
    #[error("Invalid payroll extras field '{field}': {message}")]
    InvalidExtras {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The backing store could not serve the request.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// The payroll export could not be written.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_violation_names_required_slot() {
        let error = EngineError::SequenceViolation {
            slot: ClockSlot::MorningOut,
            required: "morningIn".to_string(),
        };
        assert_eq!(error.to_string(), "You must clock in (morningIn) first.");
    }

    #[test]
    fn test_duplicate_punch_displays_slot() {
        let error = EngineError::DuplicatePunch {
            slot: ClockSlot::OvertimeOut,
        };
        assert!(
            error
                .to_string()
                .to_lowercase()
                .contains("already recorded for this slot")
        );
        assert!(error.to_string().contains("overtimeOut"));
    }

    #[test]
    fn test_user_not_found_displays_id() {
        let error = EngineError::UserNotFound {
            id: "u-404".to_string(),
        };
        assert_eq!(error.to_string(), "User not found: u-404");
    }

    #[test]
    fn test_invalid_user_displays_field_and_message() {
        let error = EngineError::InvalidUser {
            field: "pin".to_string(),
            message: "must be exactly 4 digits".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid user field 'pin': must be exactly 4 digits"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "config/payroll.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file 'config/payroll.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_admin_deletion() -> EngineResult<()> {
            Err(EngineError::AdminDeletion {
                id: "admin-1".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_admin_deletion()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
