//! Integration tests for subject-set assembly and engine delegation.
//!
//! These tests drive a `Gatekeeper` through resolvers and engines defined
//! outside the crate, the way a host application would wire them.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use testresult::TestResult;
use warden_acl::helpers::{Call, MemoryAccessControl, RecordingAccessControl, StaticResolver};
use warden_acl::{
    AccessControl, AccessError, Acl, ClaimResolver, Gatekeeper, GatekeeperSettings, Principal,
    Subject, SubjectKind, SubjectResolver, Target,
};

/// Engine that fails every call, as an unreachable policy store would.
struct UnavailableEngine;

#[derive(Debug, thiserror::Error)]
#[error("policy store unreachable")]
struct Unreachable;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AccessControl for UnavailableEngine {
    async fn assert(&self, _: &[Subject], _: &str, _: &Target) -> Result<(), AccessError> {
        Err(AccessError::engine(Unreachable))
    }

    async fn can(&self, _: &[Subject], _: &str, _: &Target) -> Result<bool, AccessError> {
        Err(AccessError::engine(Unreachable))
    }

    async fn acls(&self, _: &[Target], _: &[Subject]) -> Result<Vec<Box<dyn Acl>>, AccessError> {
        Err(AccessError::engine(Unreachable))
    }
}

/// Resolver backed by a membership table keyed by username.
struct MembershipResolver {
    memberships: BTreeMap<String, Vec<String>>,
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl SubjectResolver for MembershipResolver {
    async fn subjects(&self, principal: &Principal) -> Result<Vec<Subject>, AccessError> {
        tokio::task::yield_now().await;
        Ok(principal
            .username()
            .and_then(|username| self.memberships.get(username))
            .map(|groups| groups.iter().map(Subject::group).collect())
            .unwrap_or_default())
    }
}

fn foobar() -> Arc<Principal> {
    Arc::new(Principal::new(
        "foobar@example.com",
        BTreeMap::from([("roles".to_string(), json!(["user", "editor"]))]),
    ))
}

#[test_log::test(tokio::test)]
async fn it_checks_access_with_principal_and_role() -> TestResult {
    let engine = Arc::new(RecordingAccessControl::new(
        MemoryAccessControl::new().allow(Subject::role("user"), ["write"], "foo", Some("bar")),
    ));
    let gatekeeper = Gatekeeper::new(
        engine.clone(),
        Arc::new(Principal::from("foobar@example.com")),
        vec![Arc::new(StaticResolver::new([Subject::role("user")]))],
    );

    assert!(gatekeeper.can("write", "foo", "bar").await?);
    gatekeeper.assert("write", "foo", "bar").await?;

    let subjects = vec![Subject::principal("foobar@example.com"), Subject::role("user")];
    assert_eq!(
        engine.calls(),
        vec![
            Call::Can {
                subjects: subjects.clone(),
                verb: "write".into(),
                target: Target::new("foo", "bar"),
            },
            Call::Assert {
                subjects,
                verb: "write".into(),
                target: Target::new("foo", "bar"),
            },
        ]
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_combines_claim_and_membership_resolvers_in_order() -> TestResult {
    let memberships = MembershipResolver {
        memberships: BTreeMap::from([(
            "foobar@example.com".to_string(),
            vec!["staff".to_string()],
        )]),
    };
    let gatekeeper = Gatekeeper::new(
        Arc::new(MemoryAccessControl::new()),
        foobar(),
        vec![
            Arc::new(ClaimResolver::new("roles", SubjectKind::Role)),
            Arc::new(memberships),
        ],
    );

    assert_eq!(
        gatekeeper.subjects().await?,
        vec![
            Subject::principal("foobar@example.com"),
            Subject::role("user"),
            Subject::role("editor"),
            Subject::group("staff"),
        ]
    );
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_grants_access_through_group_membership() -> TestResult {
    let engine =
        MemoryAccessControl::new().allow(Subject::group("staff"), ["read"], "report", None);
    let memberships = MembershipResolver {
        memberships: BTreeMap::from([(
            "foobar@example.com".to_string(),
            vec!["staff".to_string()],
        )]),
    };
    let gatekeeper = Gatekeeper::new(Arc::new(engine), foobar(), vec![Arc::new(memberships)]);

    assert!(gatekeeper.can("read", "report", "q3").await?);
    assert!(!gatekeeper.can("write", "report", "q3").await?);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn it_returns_engine_failures_unchanged() {
    let gatekeeper = Gatekeeper::new(Arc::new(UnavailableEngine), foobar(), vec![]);

    let error = gatekeeper.can("read", "report", "q3").await.unwrap_err();
    assert!(matches!(error, AccessError::Engine(_)));
    assert_eq!(error.to_string(), "Access control engine failed: policy store unreachable");

    let error = gatekeeper.assert("read", "report", "q3").await.unwrap_err();
    assert!(matches!(error, AccessError::Engine(_)));

    let error = gatekeeper
        .assert_all("read", "report", ["q3"])
        .await
        .unwrap_err();
    assert!(matches!(error, AccessError::Engine(_)));
}

#[test_log::test(tokio::test)]
async fn it_denies_assert_all_when_engine_omits_a_target() -> TestResult {
    struct PartialEngine;

    struct AllowAll(Target);

    impl Acl for AllowAll {
        fn target(&self) -> &Target {
            &self.0
        }

        fn can(&self, _: &[Subject], _: &str) -> bool {
            true
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl AccessControl for PartialEngine {
        async fn assert(&self, _: &[Subject], _: &str, _: &Target) -> Result<(), AccessError> {
            Ok(())
        }

        async fn can(&self, _: &[Subject], _: &str, _: &Target) -> Result<bool, AccessError> {
            Ok(true)
        }

        async fn acls(
            &self,
            targets: &[Target],
            _: &[Subject],
        ) -> Result<Vec<Box<dyn Acl>>, AccessError> {
            Ok(targets
                .iter()
                .take(1)
                .map(|target| Box::new(AllowAll(target.clone())) as Box<dyn Acl>)
                .collect())
        }
    }

    let gatekeeper = Gatekeeper::new(Arc::new(PartialEngine), foobar(), vec![]);

    gatekeeper.assert_all("read", "doc", ["1"]).await?;
    let error = gatekeeper
        .assert_all("read", "doc", ["1", "2"])
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "Access denied to read doc#2");
    Ok(())
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn it_serves_concurrent_checks_from_one_gatekeeper() -> TestResult {
    let engine =
        MemoryAccessControl::new().allow(Subject::role("editor"), ["write"], "doc", None);
    let gatekeeper = Arc::new(
        Gatekeeper::new(
            Arc::new(engine),
            foobar(),
            vec![Arc::new(ClaimResolver::new("roles", SubjectKind::Role))],
        )
        .with_settings(GatekeeperSettings {
            deduplicate_subjects: true,
        }),
    );

    let mut handles = Vec::new();
    for id in 0..8 {
        let gatekeeper = gatekeeper.clone();
        handles.push(tokio::spawn(async move {
            gatekeeper.can("write", "doc", &id.to_string()).await
        }));
    }

    for handle in handles {
        assert!(handle.await??);
    }
    Ok(())
}
