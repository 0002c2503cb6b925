//! `Send + Sync` bound that relaxes on `wasm32-unknown-unknown`.
//!
//! Resolvers and engines are shared across threads on native targets, so
//! their traits require `Send + Sync` there. Browser builds run on a single
//! thread and often wrap handles that are neither, so the bounds vanish.

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait ConditionalSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> ConditionalSync for T {}

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub trait ConditionalSync {}

#[cfg(target_arch = "wasm32")]
impl<T> ConditionalSync for T {}
