use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The protected object being acted upon.
///
/// A target is identified by its resource `kind` (e.g. `"core\\account"`)
/// and the `id` of one instance of that kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

impl Target {
    /// Create a new target.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// The resource kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The resource instance identifier.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}
