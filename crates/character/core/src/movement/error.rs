use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Tile;

/// Reasons a movement request is refused.
///
/// Public entry points log these at debug level and return `false`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("character cannot act right now")]
    ActionBlocked,

    #[error("movement is disabled by a status effect")]
    MovementDisabled,

    #[error("no animation for {0}")]
    MissingAnimation(&'static str),

    #[error("jumping is disabled for this character")]
    JumpDisabled,

    #[error("already at {0}")]
    AlreadyThere(Tile),

    #[error("destination {0} is blocked")]
    DestinationBlocked(Tile),

    #[error("no path to {0}")]
    NoPath(Tile),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        use MoveError::*;
        match self {
            ActionBlocked | MovementDisabled | DestinationBlocked(_) | NoPath(_) => {
                ErrorSeverity::Recoverable
            }
            MissingAnimation(_) | JumpDisabled | AlreadyThere(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use MoveError::*;
        match self {
            ActionBlocked => "MOVE_ACTION_BLOCKED",
            MovementDisabled => "MOVE_DISABLED",
            MissingAnimation(_) => "MOVE_MISSING_ANIMATION",
            JumpDisabled => "MOVE_JUMP_DISABLED",
            AlreadyThere(_) => "MOVE_ALREADY_THERE",
            DestinationBlocked(_) => "MOVE_DESTINATION_BLOCKED",
            NoPath(_) => "MOVE_NO_PATH",
        }
    }
}
