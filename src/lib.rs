//! Assume-role credential identities for AWS STS.
//!
//! This crate models a single role-assumption identity: its declarative
//! configuration, a deterministic fingerprint of that configuration, and
//! on-demand retrieval of the temporary credentials it describes.
//!
//! - [`RoleIdentitySpec`] — declarative configuration: role ARN, session
//!   name, duration, inline/attached policies, session tags, transitive tag
//!   keys, external ID, source-identity reference.
//! - [`RoleIdentitySpec::fingerprint`] — SHA-256 digest of the canonical
//!   encoding of the declared fields, for detecting equivalent
//!   configurations without field-by-field comparison.
//! - [`RoleIdentity`] — pairs a spec with a lazily constructed,
//!   expiry-aware credential source. Implements [`IdentityTypeProvider`],
//!   the capability contract shared by all identity kinds.
//! - [`StsClient`] — blocking SigV4-signed client for the STS AssumeRole
//!   Query API, injected into identities through the [`AssumeRole`] seam.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use aws_role_identity::{
//!     AccessKey, IdentityTypeProvider, RoleIdentity, RoleIdentitySpec, StsClient,
//! };
//!
//! fn main() -> aws_role_identity::Result<()> {
//!     let spec: RoleIdentitySpec = serde_json::from_str(
//!         r#"{
//!             "roleARN": "arn:aws:iam::123456789012:role/demo",
//!             "sessionName": "demo-session",
//!             "durationSeconds": 3600
//!         }"#,
//!     )
//!     .expect("well-formed spec");
//!
//!     let sts = StsClient::new(AccessKey::new("key-id", "secret"))?;
//!     let identity = RoleIdentity::new(spec, Arc::new(sts));
//!
//!     println!("fingerprint: {}", identity.fingerprint()?);
//!     let creds = identity.retrieve()?;
//!     println!("temporary AK: {}", creds.access_key_id);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod provider;
pub mod response;
pub mod role;

mod request;
mod sign;

pub use client::StsClient;
pub use config::StsConfig;
pub use credential::{AccessKey, ChainProvider, CredentialProvider, EnvProvider, ProfileProvider, StaticProvider};
pub use error::{Error, Result};
pub use fingerprint::Fingerprint;
pub use identity::{IdentityTypeProvider, RoleIdentity};
pub use provider::{AssumeRole, AssumeRoleParams, AssumeRoleProvider, PolicyDescriptor, Tag};
pub use response::{AssumeRoleResponse, AssumedRoleUser, Credentials};
pub use role::{RoleConfig, RoleIdentitySpec, MAX_SESSION_DURATION_SECS, MIN_SESSION_DURATION_SECS};

// Compile-time assertions: key types must be Send + Sync for use across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<StsClient>;
    let _ = assert_send_sync::<RoleIdentity>;
    let _ = assert_send_sync::<Error>;
    let _ = assert_send_sync::<Credentials>;
};
