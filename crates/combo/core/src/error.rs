//! Common error infrastructure for combo-core.
//!
//! Domain-specific errors (e.g. [`OracleError`](crate::env::OracleError),
//! [`RegistryError`](crate::registry::RegistryError)) live next to the code
//! that raises them. This module provides the classification they share.
//!
//! # Design Principles
//!
//! - **Never fatal to the player**: no error escapes `ComboEngine::resolve`;
//!   every kind below degrades to "return the base action unchanged".
//! - **Classified**: every error reports an [`ErrorKind`] so callers can
//!   choose a log level without matching on concrete variants.

/// Failure taxonomy of the decision engine.
///
/// - **MissingState**: target despawned, gauge not applicable, buff absent
/// - **Configuration**: inconsistent rule registration or options
/// - **SequenceDesync**: an opener observed an off-script execution
/// - **ProviderFault**: the host provider failed unexpectedly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Expected state is absent. Resolved as "false" by predicates.
    MissingState,

    /// Configuration is inconsistent. Resolved by registration order.
    Configuration,

    /// An opener observed an execution that does not follow its script.
    SequenceDesync,

    /// The host provider faulted. Caught at the resolution boundary.
    ProviderFault,
}

impl ErrorKind {
    /// Returns true for kinds that indicate a bug outside the engine.
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::ProviderFault)
    }

    /// Returns true for kinds that are part of normal operation.
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::MissingState | Self::SequenceDesync)
    }
}

/// Common trait for all combo-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify by how the engine recovers, not by how bad it looks
pub trait ComboError: core::fmt::Display + core::fmt::Debug {
    /// Returns the taxonomy bucket of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
