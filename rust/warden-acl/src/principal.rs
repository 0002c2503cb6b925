use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An authenticated identity.
///
/// A principal is produced by an authentication layer before any access
/// check happens and is never mutated afterwards. The anonymous principal
/// has no username. An empty username is not a distinct identity: it
/// yields the anonymous principal, whether constructed or deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default, deserialize_with = "non_empty_username")]
    username: Option<String>,
    #[serde(default)]
    details: BTreeMap<String, Value>,
}

fn non_empty_username<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|username| !username.is_empty()))
}

impl Principal {
    /// Create a principal with the given username and attribute bag.
    ///
    /// An empty `username` produces the anonymous principal, keeping the
    /// details.
    pub fn new(username: impl Into<String>, details: BTreeMap<String, Value>) -> Self {
        let username: String = username.into();
        Self {
            username: Some(username).filter(|username| !username.is_empty()),
            details,
        }
    }

    /// The unauthenticated principal.
    ///
    /// Its identity subject is `Subject::Principal("")`, which no
    /// authenticated principal can share.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The username, or `None` for the anonymous principal.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether this principal is the anonymous one.
    pub fn is_anonymous(&self) -> bool {
        self.username.is_none()
    }

    /// All attributes attached by the authentication layer.
    pub fn details(&self) -> &BTreeMap<String, Value> {
        &self.details
    }

    /// A single attribute, if present.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }
}

impl From<&str> for Principal {
    fn from(username: &str) -> Self {
        Self::new(username, BTreeMap::new())
    }
}
