use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Verbs known for each ACL type, with human readable descriptions.
///
/// Keys of the outer map are ACL types (e.g. `core\account`), keys of the
/// inner map are verbs (e.g. `reticulate-splines`). A user interface can
/// collect these to offer configurable permissions per role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeMap<String, BTreeMap<String, String>>);

impl Permissions {
    /// An empty permission list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `verb` on `kind`, replacing any previous description.
    pub fn declare(
        mut self,
        kind: impl Into<String>,
        verb: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.0
            .entry(kind.into())
            .or_default()
            .insert(verb.into(), description.into());
        self
    }

    /// Combine with `other`; descriptions from `other` win on conflict.
    pub fn merge(mut self, other: Permissions) -> Self {
        for (kind, verbs) in other.0 {
            self.0.entry(kind).or_default().extend(verbs);
        }
        self
    }

    /// All ACL types, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Verbs declared for `kind`, sorted.
    pub fn verbs(&self, kind: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(kind)
            .into_iter()
            .flat_map(|verbs| verbs.keys().map(String::as_str))
    }

    /// The description of `verb` on `kind`.
    pub fn describe(&self, kind: &str, verb: &str) -> Option<&str> {
        self.0.get(kind)?.get(verb).map(String::as_str)
    }

    /// Whether no permission is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source of the permissions a module defines.
pub trait PermissionRegistry {
    /// The permissions this registry knows about.
    fn permissions(&self) -> Permissions;
}

/// A registry with a fixed permission list, usually loaded from
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticPermissionRegistry(Permissions);

impl StaticPermissionRegistry {
    /// Wrap `permissions`.
    pub fn new(permissions: Permissions) -> Self {
        Self(permissions)
    }
}

impl PermissionRegistry for StaticPermissionRegistry {
    fn permissions(&self) -> Permissions {
        self.0.clone()
    }
}

/// Merge the permissions of several registries, in order.
pub fn collect_permissions<'a>(
    registries: impl IntoIterator<Item = &'a dyn PermissionRegistry>,
) -> Permissions {
    registries
        .into_iter()
        .fold(Permissions::new(), |all, registry| all.merge(registry.permissions()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn it_loads_registry_from_json() -> TestResult {
        let registry: StaticPermissionRegistry = serde_json::from_str(
            r#"{ "core\\account": { "reticulate-splines": "Reticulate any Spline in the account" } }"#,
        )?;
        let permissions = registry.permissions();

        assert_eq!(permissions.kinds().collect::<Vec<_>>(), vec!["core\\account"]);
        assert_eq!(
            permissions.describe("core\\account", "reticulate-splines"),
            Some("Reticulate any Spline in the account")
        );
        Ok(())
    }

    #[test]
    fn it_lists_verbs_sorted() {
        let permissions = Permissions::new()
            .declare("doc", "write", "Edit a document")
            .declare("doc", "read", "Read a document");

        assert_eq!(permissions.verbs("doc").collect::<Vec<_>>(), vec!["read", "write"]);
        assert_eq!(permissions.verbs("folder").count(), 0);
    }

    #[test]
    fn it_merges_registries_with_later_descriptions_winning() {
        let first = StaticPermissionRegistry::new(
            Permissions::new()
                .declare("doc", "read", "Read")
                .declare("doc", "write", "Write"),
        );
        let second = StaticPermissionRegistry::new(
            Permissions::new()
                .declare("doc", "write", "Edit a document")
                .declare("folder", "list", "List a folder"),
        );

        let permissions = collect_permissions([
            &first as &dyn PermissionRegistry,
            &second as &dyn PermissionRegistry,
        ]);
        assert_eq!(permissions.describe("doc", "read"), Some("Read"));
        assert_eq!(permissions.describe("doc", "write"), Some("Edit a document"));
        assert_eq!(permissions.describe("folder", "list"), Some("List a folder"));
        assert!(!permissions.is_empty());
    }
}
