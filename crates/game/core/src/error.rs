//! Common error infrastructure for dungeon-core.
//!
//! Domain-specific errors (`ActionError`, `StateError`) are defined next to
//! the code that raises them. This module provides the shared classification
//! used by the engine for logging and by callers for recovery decisions.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Local**: No error is fatal to the simulation; a failed command leaves
//!   state unchanged

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The same command may succeed after other commands
///   (e.g. crafting once more wood is collected)
/// - **Validation**: The command is invalid for the current state
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later with the same command.
    ///
    /// Examples: crafting ingredients not yet collected
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown entity, destroying a spawner from afar
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: position index desync, duplicate entity id
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all dungeon-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
