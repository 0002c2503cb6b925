#![warn(missing_docs)]

//! Subject resolution and access-control delegation.
//!
//! This crate decides whether an authenticated [`Principal`] may perform a
//! verb on a [`Target`]. It does not evaluate policies itself. Instead a
//! [`Gatekeeper`] expands the principal into the set of [`Subject`]s an
//! [`AccessControl`] engine should evaluate, and hands the engine that set
//! together with the verb and target.
//!
//! # Quick Example
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use std::sync::Arc;
//! use warden_acl::{Gatekeeper, Principal, Subject};
//! use warden_acl::helpers::{MemoryAccessControl, StaticResolver};
//!
//! let engine = MemoryAccessControl::new().allow(Subject::role("user"), ["write"], "foo", None);
//! let gatekeeper = Gatekeeper::new(
//!     Arc::new(engine),
//!     Arc::new(Principal::from("foobar@example.com")),
//!     vec![Arc::new(StaticResolver::new([Subject::role("user")]))],
//! );
//!
//! assert!(gatekeeper.can("write", "foo", "bar").await.unwrap());
//! assert!(gatekeeper.assert("delete", "foo", "bar").await.is_err());
//! # });
//! ```
//!
//! # Subject Sets
//!
//! For every check the gatekeeper builds the subject set afresh:
//!
//! ```text
//! [principal(username), resolver₁ subjects…, resolver₂ subjects…, …]
//! ```
//!
//! Resolvers are consulted in the order they were given, and their output
//! is concatenated without reordering. Duplicates are kept unless
//! [`GatekeeperSettings::deduplicate_subjects`] is set.
//!
//! # Errors
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`AccessError::PermissionDenied`] | the engine's `assert`, or [`Gatekeeper::assert_all`] |
//! | [`AccessError::Resolution`] | a [`SubjectResolver`] |
//! | [`AccessError::InvalidArgument`] | the gatekeeper, before any resolver runs |
//! | [`AccessError::Engine`] | the engine, for failures other than a denial |
//!
//! Resolver and engine errors reach the caller unchanged.

mod error;
pub use error::*;

mod sync;
pub use sync::*;

mod subject;
pub use subject::*;

mod target;
pub use target::*;

mod principal;
pub use principal::*;

mod resolver;
pub use resolver::*;

mod engine;
pub use engine::*;

mod settings;
pub use settings::*;

mod gatekeeper;
pub use gatekeeper::*;

mod claim;
pub use claim::*;

mod registry;
pub use registry::*;

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;
