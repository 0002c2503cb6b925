use crate::{AccessError, ConditionalSync, Principal, Subject};
use async_trait::async_trait;

/// Maps a principal to additional subjects relevant to access control.
///
/// Implementations may consult external state (a directory, a database)
/// but must not have caller visible side effects. An empty result is
/// valid. Any error aborts the access check it was called for.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use warden_acl::{AccessError, Principal, Subject, SubjectResolver};
///
/// struct Everyone;
///
/// #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
/// #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
/// impl SubjectResolver for Everyone {
///     async fn subjects(&self, _principal: &Principal) -> Result<Vec<Subject>, AccessError> {
///         Ok(vec![Subject::role("everyone")])
///     }
/// }
/// ```
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait SubjectResolver: ConditionalSync {
    /// Resolve the subjects for `principal`, in a stable order.
    async fn subjects(&self, principal: &Principal) -> Result<Vec<Subject>, AccessError>;
}
