//! Error types for secret-santa
//!
//! Guard rejections (the event is in the wrong state, the actor lacks the
//! right, ...) and faults (I/O, corrupt files, exhausted assignment attempts)
//! share one enum. Each variant has a stable code for programmatic handling,
//! and the `Display` text of a rejection is the message shown to the user.

use thiserror::Error;

use crate::domain::Transition;

/// Result type alias for secret-santa operations
pub type Result<T> = std::result::Result<T, SantaError>;

/// Main error type for all secret-santa operations
#[derive(Debug, Error)]
pub enum SantaError {
    /// `create` while the community already has an active event
    #[error("There is already an active Secret Santa event in this community. Cancel it first with `secret-santa cancel`")]
    AlreadyActive,

    /// No active event in the community
    #[error("There is no active Secret Santa event in this community.")]
    NotActive,

    /// Participant or assignment change after the event started
    #[error("{}", already_started_message(.0))]
    AlreadyStarted(Transition),

    /// `join` by someone already in the participant list
    #[error("You are already participating in this Secret Santa event!")]
    AlreadyJoined,

    /// `leave` by someone not in the participant list
    #[error("You are not participating in this Secret Santa event.")]
    NotJoined,

    /// `start` or `cancel` by someone other than the organizer
    #[error("Only the event organizer can {0} the Secret Santa!")]
    NotOrganizer(Transition),

    /// `start` below the configured participant minimum
    #[error("You need at least {required} participants to start a Secret Santa event! (currently {actual})")]
    TooFewParticipants { required: usize, actual: usize },

    /// The assignment engine needs at least two people
    #[error("Need at least 2 participants, got {actual}")]
    InsufficientParticipants { actual: usize },

    /// The assignment engine was handed the same participant twice
    #[error("Participant listed more than once: {0}")]
    DuplicateParticipant(String),

    /// Rejection sampling hit its attempt cap without finding a derangement
    #[error("No valid assignment found after {attempts} attempts")]
    AssignmentExhausted { attempts: u32 },

    /// Saving the event document failed; the transition was not committed
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

fn already_started_message(transition: &Transition) -> String {
    match transition {
        Transition::Join | Transition::Leave => format!(
            "This Secret Santa event has already started. You cannot {} now.",
            transition
        ),
        _ => "This Secret Santa event has already been started!".to_string(),
    }
}

impl SantaError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            SantaError::AlreadyActive => "ALREADY_ACTIVE",
            SantaError::NotActive => "NOT_ACTIVE",
            SantaError::AlreadyStarted(_) => "ALREADY_STARTED",
            SantaError::AlreadyJoined => "ALREADY_JOINED",
            SantaError::NotJoined => "NOT_JOINED",
            SantaError::NotOrganizer(_) => "NOT_ORGANIZER",
            SantaError::TooFewParticipants { .. } => "TOO_FEW_PARTICIPANTS",
            SantaError::InsufficientParticipants { .. } => "INSUFFICIENT_PARTICIPANTS",
            SantaError::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            SantaError::AssignmentExhausted { .. } => "ASSIGNMENT_EXHAUSTED",
            SantaError::Persistence(_) => "PERSISTENCE_FAILURE",
            SantaError::InvalidJson(_) => "INVALID_JSON",
            SantaError::FileNotFound(_) => "FILE_NOT_FOUND",
            SantaError::ConfigError(_) => "CONFIG_ERROR",
            SantaError::Io(_) => "IO_ERROR",
            SantaError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Whether this is an expected, user-facing guard rejection rather than a fault.
    ///
    /// Rejections are reported back to the actor and never logged as system errors.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SantaError::AlreadyActive
                | SantaError::NotActive
                | SantaError::AlreadyStarted(_)
                | SantaError::AlreadyJoined
                | SantaError::NotJoined
                | SantaError::NotOrganizer(_)
                | SantaError::TooFewParticipants { .. }
        )
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        SantaError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Failure to deliver one assignment notice.
///
/// Counted by the fan-out after `start`, never retried, never propagated.
#[derive(Debug, Error)]
#[error("Failed to notify {recipient}: {reason}")]
pub struct DeliveryError {
    pub recipient: String,
    pub reason: String,
}

impl DeliveryError {
    pub fn new(recipient: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        DeliveryError {
            recipient: recipient.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &SantaError) -> i32 {
    if error.is_rejection() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SantaError::AlreadyActive.code(), "ALREADY_ACTIVE");
        assert_eq!(SantaError::NotActive.code(), "NOT_ACTIVE");
        assert_eq!(SantaError::AlreadyStarted(Transition::Join).code(), "ALREADY_STARTED");
        assert_eq!(SantaError::AlreadyJoined.code(), "ALREADY_JOINED");
        assert_eq!(SantaError::NotJoined.code(), "NOT_JOINED");
        assert_eq!(SantaError::NotOrganizer(Transition::Cancel).code(), "NOT_ORGANIZER");
        assert_eq!(
            SantaError::TooFewParticipants { required: 3, actual: 2 }.code(),
            "TOO_FEW_PARTICIPANTS"
        );
        assert_eq!(
            SantaError::InsufficientParticipants { actual: 1 }.code(),
            "INSUFFICIENT_PARTICIPANTS"
        );
        assert_eq!(SantaError::Persistence("disk".into()).code(), "PERSISTENCE_FAILURE");
        assert_eq!(SantaError::InvalidJson("test".into()).code(), "INVALID_JSON");
    }

    #[test]
    fn test_already_started_message_depends_on_transition() {
        assert!(SantaError::AlreadyStarted(Transition::Join)
            .to_string()
            .ends_with("You cannot join now."));
        assert!(SantaError::AlreadyStarted(Transition::Leave)
            .to_string()
            .ends_with("You cannot leave now."));
        assert_eq!(
            SantaError::AlreadyStarted(Transition::Start).to_string(),
            "This Secret Santa event has already been started!"
        );
    }

    #[test]
    fn test_not_organizer_message_names_the_action() {
        assert_eq!(
            SantaError::NotOrganizer(Transition::Start).to_string(),
            "Only the event organizer can start the Secret Santa!"
        );
        assert_eq!(
            SantaError::NotOrganizer(Transition::Cancel).to_string(),
            "Only the event organizer can cancel the Secret Santa!"
        );
    }

    #[test]
    fn test_rejections_vs_faults() {
        assert!(SantaError::AlreadyJoined.is_rejection());
        assert!(SantaError::TooFewParticipants { required: 3, actual: 0 }.is_rejection());
        assert!(!SantaError::InsufficientParticipants { actual: 1 }.is_rejection());
        assert!(!SantaError::AssignmentExhausted { attempts: 10 }.is_rejection());
        assert!(!SantaError::Persistence("x".into()).is_rejection());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&SantaError::NotActive), 2);
        assert_eq!(to_exit_code(&SantaError::Persistence("x".into())), 1);
        assert_eq!(to_exit_code(&SantaError::ConfigError("x".into())), 1);
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = SantaError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }

    #[test]
    fn test_delivery_error_display() {
        let err = DeliveryError::new("u1", "DMs disabled");
        assert_eq!(err.to_string(), "Failed to notify u1: DMs disabled");
    }
}
