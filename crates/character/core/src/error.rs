//! Common error infrastructure for character-core.
//!
//! Domain-specific errors (`MoveError`, `CombatError`, `StatusError`) live next
//! to the operations they describe. None of them escape the public entry points
//! as panics: movement entry points log them and collapse to a boolean, combat
//! entry points fold them into a [`crate::DamageReport`].

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the world may change so the same request succeeds later
/// - **Validation**: the request itself is invalid for this character
/// - **Internal**: an invariant was found broken and silently repaired
/// - **Fatal**: the character can no longer be simulated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition: destination blocked, action in progress.
    Recoverable,

    /// Invalid input: unknown status name, missing animation, out of range index.
    Validation,

    /// Unexpected state inconsistency that was absorbed by a guard.
    Internal,

    /// Unrecoverable state.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all character-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Give every variant a stable `error_code` for log filtering and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
