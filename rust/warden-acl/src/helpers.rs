//! In-memory engine and resolvers for tests and examples.
//!
//! Enabled by the `helpers` feature.

use crate::{AccessControl, AccessError, Acl, Principal, Subject, SubjectResolver, Target};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Verb that matches every verb in a grant.
pub const ANY_VERB: &str = "*";

#[derive(Debug, Clone)]
struct Grant {
    subject: Subject,
    verbs: BTreeSet<String>,
    kind: String,
    id: Option<String>,
}

impl Grant {
    fn covers(&self, target: &Target) -> bool {
        self.kind == target.kind() && self.id.as_deref().is_none_or(|id| id == target.id())
    }

    fn permits(&self, subjects: &[Subject], verb: &str) -> bool {
        let verb_granted = self.verbs.contains(verb) || self.verbs.contains(ANY_VERB);
        verb_granted && subjects.contains(&self.subject)
    }
}

/// Allow-list access-control engine.
///
/// ```
/// # tokio_test::block_on(async {
/// use warden_acl::{AccessControl, Subject, Target};
/// use warden_acl::helpers::MemoryAccessControl;
///
/// let engine = MemoryAccessControl::new().allow(Subject::role("user"), ["read"], "doc", None);
/// let subjects = [Subject::role("user")];
/// assert!(engine.can(&subjects, "read", &Target::new("doc", "42")).await.unwrap());
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAccessControl {
    grants: Vec<Grant>,
}

impl MemoryAccessControl {
    /// Create an engine that denies everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `subject` to perform `verbs` on `kind#id`, or on every instance
    /// of `kind` when `id` is `None`.
    pub fn allow<V>(
        mut self,
        subject: Subject,
        verbs: impl IntoIterator<Item = V>,
        kind: &str,
        id: Option<&str>,
    ) -> Self
    where
        V: Into<String>,
    {
        self.grants.push(Grant {
            subject,
            verbs: verbs.into_iter().map(Into::into).collect(),
            kind: kind.to_string(),
            id: id.map(str::to_string),
        });
        self
    }

    fn permits(&self, subjects: &[Subject], verb: &str, target: &Target) -> bool {
        self.grants
            .iter()
            .any(|grant| grant.covers(target) && grant.permits(subjects, verb))
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AccessControl for MemoryAccessControl {
    async fn assert(
        &self,
        subjects: &[Subject],
        verb: &str,
        target: &Target,
    ) -> Result<(), AccessError> {
        if self.permits(subjects, verb, target) {
            Ok(())
        } else {
            Err(AccessError::denied(verb, target.clone()))
        }
    }

    async fn can(
        &self,
        subjects: &[Subject],
        verb: &str,
        target: &Target,
    ) -> Result<bool, AccessError> {
        Ok(self.permits(subjects, verb, target))
    }

    async fn acls(
        &self,
        targets: &[Target],
        _subjects: &[Subject],
    ) -> Result<Vec<Box<dyn Acl>>, AccessError> {
        Ok(targets
            .iter()
            .map(|target| {
                Box::new(MemoryAcl {
                    target: target.clone(),
                    grants: self
                        .grants
                        .iter()
                        .filter(|grant| grant.covers(target))
                        .cloned()
                        .collect(),
                }) as Box<dyn Acl>
            })
            .collect())
    }
}

#[derive(Debug)]
struct MemoryAcl {
    target: Target,
    grants: Vec<Grant>,
}

impl Acl for MemoryAcl {
    fn target(&self) -> &Target {
        &self.target
    }

    fn can(&self, subjects: &[Subject], verb: &str) -> bool {
        self.grants.iter().any(|grant| grant.permits(subjects, verb))
    }
}

/// A call observed by [`RecordingAccessControl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// [`AccessControl::assert`]
    Assert {
        /// Subjects passed to the engine.
        subjects: Vec<Subject>,
        /// Verb passed to the engine.
        verb: String,
        /// Target passed to the engine.
        target: Target,
    },
    /// [`AccessControl::can`]
    Can {
        /// Subjects passed to the engine.
        subjects: Vec<Subject>,
        /// Verb passed to the engine.
        verb: String,
        /// Target passed to the engine.
        target: Target,
    },
    /// [`AccessControl::acls`]
    Acls {
        /// Targets passed to the engine.
        targets: Vec<Target>,
        /// Subjects passed to the engine.
        subjects: Vec<Subject>,
    },
}

/// Engine wrapper that records every call before delegating.
#[derive(Debug, Default)]
pub struct RecordingAccessControl<E> {
    inner: E,
    calls: Mutex<Vec<Call>>,
}

impl<E> RecordingAccessControl<E> {
    /// Wrap `inner`.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The calls observed so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<E: AccessControl> AccessControl for RecordingAccessControl<E> {
    async fn assert(
        &self,
        subjects: &[Subject],
        verb: &str,
        target: &Target,
    ) -> Result<(), AccessError> {
        self.record(Call::Assert {
            subjects: subjects.to_vec(),
            verb: verb.to_string(),
            target: target.clone(),
        });
        self.inner.assert(subjects, verb, target).await
    }

    async fn can(
        &self,
        subjects: &[Subject],
        verb: &str,
        target: &Target,
    ) -> Result<bool, AccessError> {
        self.record(Call::Can {
            subjects: subjects.to_vec(),
            verb: verb.to_string(),
            target: target.clone(),
        });
        self.inner.can(subjects, verb, target).await
    }

    async fn acls(
        &self,
        targets: &[Target],
        subjects: &[Subject],
    ) -> Result<Vec<Box<dyn Acl>>, AccessError> {
        self.record(Call::Acls {
            targets: targets.to_vec(),
            subjects: subjects.to_vec(),
        });
        self.inner.acls(targets, subjects).await
    }
}

/// Resolver that always yields the same subjects.
#[derive(Debug, Default)]
pub struct StaticResolver {
    subjects: Vec<Subject>,
    calls: AtomicUsize,
}

impl StaticResolver {
    /// Create a resolver yielding `subjects`, in order.
    pub fn new(subjects: impl IntoIterator<Item = Subject>) -> Self {
        Self {
            subjects: subjects.into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times this resolver has been consulted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SubjectResolver for StaticResolver {
    async fn subjects(&self, _principal: &Principal) -> Result<Vec<Subject>, AccessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.subjects.clone())
    }
}

/// Resolver that always fails with [`AccessError::Resolution`].
#[derive(Debug, Clone)]
pub struct FailingResolver {
    message: String,
}

impl FailingResolver {
    /// Create a resolver failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SubjectResolver for FailingResolver {
    async fn subjects(&self, _principal: &Principal) -> Result<Vec<Subject>, AccessError> {
        Err(AccessError::resolution(self.message.clone()))
    }
}
