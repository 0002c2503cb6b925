//! The access-control engine boundary.
//!
//! Rule storage and policy matching live behind [`AccessControl`]. This
//! crate only hands an engine the subjects, verb and target of one check.

use crate::{AccessError, ConditionalSync, Subject, Target};
use async_trait::async_trait;

/// An access-control engine.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AccessControl: ConditionalSync {
    /// Succeed if `subjects` hold `verb` on `target`, otherwise fail with
    /// [`AccessError::PermissionDenied`].
    async fn assert(
        &self,
        subjects: &[Subject],
        verb: &str,
        target: &Target,
    ) -> Result<(), AccessError>;

    /// Whether `subjects` hold `verb` on `target`.
    ///
    /// A denial is `Ok(false)`; errors are reserved for engine failures.
    async fn can(&self, subjects: &[Subject], verb: &str, target: &Target)
    -> Result<bool, AccessError>;

    /// Load the access lists of several targets at once, as seen by
    /// `subjects`.
    async fn acls(
        &self,
        targets: &[Target],
        subjects: &[Subject],
    ) -> Result<Vec<Box<dyn Acl>>, AccessError>;
}

/// The access list of a single target.
pub trait Acl: ConditionalSync {
    /// The target this list protects.
    fn target(&self) -> &Target;

    /// Whether `subjects` hold `verb` on [`Acl::target`].
    fn can(&self, subjects: &[Subject], verb: &str) -> bool;
}
