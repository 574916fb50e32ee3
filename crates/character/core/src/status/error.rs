use crate::error::{ErrorSeverity, GameError};

/// Errors raised when applying status effects by name or to the wrong kind
/// of character.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("unknown status effect '{0}'")]
    UnknownStatus(String),

    #[error("status effect {0} cannot be applied to a player character")]
    RefusedForPlayer(&'static str),

    #[error("status effect duration {0}ms is not positive")]
    NonPositiveDuration(i64),
}

impl GameError for StatusError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            StatusError::UnknownStatus(_) => "STATUS_UNKNOWN",
            StatusError::RefusedForPlayer(_) => "STATUS_REFUSED_FOR_PLAYER",
            StatusError::NonPositiveDuration(_) => "STATUS_NON_POSITIVE_DURATION",
        }
    }
}
