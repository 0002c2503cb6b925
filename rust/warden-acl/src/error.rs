use crate::Target;
use std::error::Error;

/// Boxed error raised by a resolver or engine implementation.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors that can occur while checking access.
///
/// The gatekeeper never translates these: whatever a resolver or engine
/// returns reaches the caller as is.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The subjects do not hold the verb on the target.
    #[error("Access denied to {verb} {target}")]
    PermissionDenied {
        /// The verb that was requested.
        verb: String,
        /// The target the verb was requested on.
        target: Target,
    },

    /// A subject resolver failed.
    #[error("Subject resolution failed: {0}")]
    Resolution(#[source] BoxError),

    /// A verb or target identifier is malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The access-control engine failed for a reason other than a denial.
    #[error("Access control engine failed: {0}")]
    Engine(#[source] BoxError),
}

impl AccessError {
    /// Create a [`AccessError::PermissionDenied`].
    pub fn denied(verb: impl Into<String>, target: Target) -> Self {
        Self::PermissionDenied {
            verb: verb.into(),
            target,
        }
    }

    /// Wrap a resolver failure.
    pub fn resolution(error: impl Into<BoxError>) -> Self {
        Self::Resolution(error.into())
    }

    /// Wrap an engine failure.
    pub fn engine(error: impl Into<BoxError>) -> Self {
        Self::Engine(error.into())
    }

    /// Whether this error is a denial rather than a failure.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
