use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An identity facet evaluated by an access-control engine.
///
/// Subjects are plain values: two subjects are equal when both the variant
/// and its payload are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Subject {
    /// The authenticated principal itself, by username.
    Principal(String),
    /// A role held by the principal.
    Role(String),
    /// A group the principal belongs to.
    Group(String),
}

impl Subject {
    /// Create a principal subject.
    pub fn principal(username: impl Into<String>) -> Self {
        Self::Principal(username.into())
    }

    /// Create a role subject.
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role(name.into())
    }

    /// Create a group subject.
    pub fn group(name: impl Into<String>) -> Self {
        Self::Group(name.into())
    }

    /// The variant of this subject.
    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Principal(_) => SubjectKind::Principal,
            Self::Role(_) => SubjectKind::Role,
            Self::Group(_) => SubjectKind::Group,
        }
    }

    /// The payload of this subject (username or name).
    pub fn id(&self) -> &str {
        match self {
            Self::Principal(id) | Self::Role(id) | Self::Group(id) => id,
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// Discriminant of a [`Subject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// See [`Subject::Principal`].
    Principal,
    /// See [`Subject::Role`].
    Role,
    /// See [`Subject::Group`].
    Group,
}

impl SubjectKind {
    /// Build a subject of this kind.
    pub fn subject(self, id: impl Into<String>) -> Subject {
        match self {
            Self::Principal => Subject::Principal(id.into()),
            Self::Role => Subject::Role(id.into()),
            Self::Group => Subject::Group(id.into()),
        }
    }
}

impl Display for SubjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Principal => "principal",
            Self::Role => "role",
            Self::Group => "group",
        })
    }
}
