//! gscp store client
//!
//! Remote-store collaborator for the gscp copy library: a [`RemoteObject`]
//! (bucket, key) handle plus a [`Client`] that performs uploads, downloads,
//! server-side copies, recursive prefix listing and existence checks through
//! `object_store`.
//!
//! The default client targets Google Cloud Storage using ambient credentials;
//! [`Client::in_memory`] provides an in-process backend with the same surface
//! for tests and local development. Retry and authentication semantics belong
//! to `object_store`, not to this crate.

pub mod client;
pub mod error;
pub mod object;

// Re-export commonly used types
pub use client::{BucketProvider, Client};
pub use error::{StoreError, StoreResult};
pub use object::RemoteObject;
