use crate::{AccessError, Principal, Subject, SubjectKind, SubjectResolver};
use async_trait::async_trait;
use serde_json::Value;

/// Error raised when a principal detail has an unusable shape.
#[derive(Debug, thiserror::Error)]
#[error("Principal detail '{key}' must be a string or an array of strings")]
pub struct MalformedClaim {
    /// The detail key that was read.
    pub key: String,
}

/// Derives subjects from an entry of the principal's detail bag.
///
/// The authentication layer often already knows a principal's roles or
/// groups (e.g. from token claims). A `ClaimResolver` reads the detail at
/// `key` and turns a string into one subject, or an array of strings into
/// one subject per element.
///
/// ```
/// # tokio_test::block_on(async {
/// use std::collections::BTreeMap;
/// use warden_acl::{ClaimResolver, Principal, Subject, SubjectKind, SubjectResolver};
///
/// let principal = Principal::new(
///     "jane",
///     BTreeMap::from([("roles".to_string(), serde_json::json!(["editor", "viewer"]))]),
/// );
/// let resolver = ClaimResolver::new("roles", SubjectKind::Role);
///
/// assert_eq!(
///     resolver.subjects(&principal).await.unwrap(),
///     vec![Subject::role("editor"), Subject::role("viewer")]
/// );
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ClaimResolver {
    key: String,
    kind: SubjectKind,
}

impl ClaimResolver {
    /// Read subjects of `kind` from the detail named `key`.
    pub fn new(key: impl Into<String>, kind: SubjectKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }

    fn malformed(&self) -> AccessError {
        AccessError::resolution(MalformedClaim {
            key: self.key.clone(),
        })
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SubjectResolver for ClaimResolver {
    async fn subjects(&self, principal: &Principal) -> Result<Vec<Subject>, AccessError> {
        match principal.detail(&self.key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(id)) => Ok(vec![self.kind.subject(id.as_str())]),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| {
                    value
                        .as_str()
                        .map(|id| self.kind.subject(id))
                        .ok_or_else(|| self.malformed())
                })
                .collect(),
            Some(_) => Err(self.malformed()),
        }
    }
}
