use crate::{
    AccessControl, AccessError, GatekeeperSettings, Principal, Subject, SubjectResolver, Target,
};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, trace};

/// Access control helper bound to one principal.
///
/// A `Gatekeeper` expands its principal into a subject set on every check
/// and delegates the decision to an [`AccessControl`] engine. The subject
/// set always starts with the principal's own identity subject, followed by
/// the output of each resolver in the order the resolvers were supplied.
///
/// The gatekeeper holds no mutable state and may be shared between tasks.
#[derive(Clone)]
pub struct Gatekeeper {
    engine: Arc<dyn AccessControl>,
    principal: Arc<Principal>,
    resolvers: Vec<Arc<dyn SubjectResolver>>,
    settings: GatekeeperSettings,
}

impl Debug for Gatekeeper {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gatekeeper")
            .field("principal", &self.principal)
            .field("resolvers", &self.resolvers.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl Gatekeeper {
    /// Create a new gatekeeper.
    ///
    /// `resolvers` may be empty, in which case the subject set is just the
    /// principal's identity subject.
    pub fn new(
        engine: Arc<dyn AccessControl>,
        principal: Arc<Principal>,
        resolvers: Vec<Arc<dyn SubjectResolver>>,
    ) -> Self {
        Self {
            engine,
            principal,
            resolvers,
            settings: GatekeeperSettings::default(),
        }
    }

    /// Replace the settings of this gatekeeper.
    pub fn with_settings(mut self, settings: GatekeeperSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The principal this gatekeeper checks access for.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The settings in effect.
    pub fn settings(&self) -> &GatekeeperSettings {
        &self.settings
    }

    /// Assemble the subject set for the principal.
    ///
    /// Resolvers are called sequentially, in construction order. The first
    /// resolver error is returned unchanged.
    pub async fn subjects(&self) -> Result<Vec<Subject>, AccessError> {
        let mut subjects = vec![Subject::principal(
            self.principal.username().unwrap_or_default(),
        )];

        for (index, resolver) in self.resolvers.iter().enumerate() {
            let resolved = resolver
                .subjects(&self.principal)
                .await
                .inspect_err(|error| {
                    debug!(resolver = index, %error, "Subject resolution failed");
                })?;
            trace!(resolver = index, count = resolved.len(), "Resolved subjects");
            subjects.extend(resolved);
        }

        if self.settings.deduplicate_subjects {
            let mut seen = HashSet::with_capacity(subjects.len());
            subjects.retain(|subject| seen.insert(subject.clone()));
        }

        Ok(subjects)
    }

    /// Fail unless the principal may perform `verb` on `kind#id`.
    ///
    /// A denial is whatever the engine's `assert` returns.
    pub async fn assert(&self, verb: &str, kind: &str, id: &str) -> Result<(), AccessError> {
        let target = checked_target(verb, kind, id)?;
        let subjects = self.subjects().await?;

        debug!(verb, %target, subjects = subjects.len(), "Asserting access");
        self.engine
            .assert(&subjects, verb, &target)
            .await
            .inspect_err(|error| debug!(verb, %target, %error, "Access assertion failed"))
    }

    /// Whether the principal may perform `verb` on `kind#id`.
    pub async fn can(&self, verb: &str, kind: &str, id: &str) -> Result<bool, AccessError> {
        let target = checked_target(verb, kind, id)?;
        let subjects = self.subjects().await?;

        let allowed = self.engine.can(&subjects, verb, &target).await?;
        debug!(verb, %target, subjects = subjects.len(), allowed, "Checked access");
        Ok(allowed)
    }

    /// Fail unless the principal may perform `verb` on every `kind#id` in
    /// `ids`.
    ///
    /// The access lists of all targets are loaded in one engine call. The
    /// first target whose list denies the verb, or for which the engine
    /// returned no list, is reported in [`AccessError::PermissionDenied`].
    pub async fn assert_all<I>(&self, verb: &str, kind: &str, ids: I) -> Result<(), AccessError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        checked_kind(verb, kind)?;
        let targets = ids
            .into_iter()
            .map(|id| checked_target(verb, kind, id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if targets.is_empty() {
            return Ok(());
        }

        let subjects = self.subjects().await?;
        debug!(
            verb,
            kind,
            targets = targets.len(),
            subjects = subjects.len(),
            "Asserting access to all"
        );
        let acls = self.engine.acls(&targets, &subjects).await?;

        for target in &targets {
            let permitted = acls
                .iter()
                .find(|acl| acl.target() == target)
                .is_some_and(|acl| acl.can(&subjects, verb));
            if !permitted {
                debug!(verb, %target, "Access denied");
                return Err(AccessError::denied(verb, target.clone()));
            }
        }

        Ok(())
    }
}

fn checked_kind(verb: &str, kind: &str) -> Result<(), AccessError> {
    if verb.is_empty() {
        return Err(AccessError::InvalidArgument("verb must not be empty".into()));
    }
    if kind.is_empty() {
        return Err(AccessError::InvalidArgument(
            "target type must not be empty".into(),
        ));
    }
    Ok(())
}

fn checked_target(verb: &str, kind: &str, id: &str) -> Result<Target, AccessError> {
    checked_kind(verb, kind)?;
    if id.is_empty() {
        return Err(AccessError::InvalidArgument(format!(
            "target id for type '{kind}' must not be empty"
        )));
    }
    Ok(Target::new(kind, id))
}
