//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`Rejection`, `ActorError`, `RosterError`) live next
//! to the code that produces them. They all implement [`GameError`] so callers
//! can classify failures without matching on every variant.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the same command may succeed once the selector or the
///   board changes (target out of range, cell occupied)
/// - **Validation**: the command cannot succeed in the current turn
///   (wrong phase, unit exhausted, battle over)
/// - **Internal**: a state inconsistency that indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for logging fields and assertions in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
