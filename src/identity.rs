//! Role-assumption identities and the capability contract they satisfy.

use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::provider::{AssumeRole, AssumeRoleProvider};
use crate::response::Credentials;
use crate::role::RoleIdentitySpec;

/// The capability set every identity kind must satisfy.
///
/// Callers hold the abstract capability (for example as
/// `Box<dyn IdentityTypeProvider>`) so that role-assumption, static-key,
/// web-identity and future identity kinds can be handled polymorphically.
/// [`RoleIdentity`] is the role-assumption variant.
pub trait IdentityTypeProvider {
    /// Returns a deterministic, content-derived fingerprint of the identity
    /// configuration.
    fn fingerprint(&self) -> Result<Fingerprint>;

    /// Returns `true` if no credential source has been constructed yet, or
    /// the constructed source reports its credentials as expired.
    fn is_expired(&self) -> bool;

    /// Returns the current temporary credentials, constructing the
    /// underlying credential source on first call.
    fn retrieve(&self) -> Result<Credentials>;
}

/// A role-assumption identity: declarative configuration plus a lazily
/// constructed credential source.
///
/// The credential source is built at most once per identity (until
/// [`reset`](RoleIdentity::reset)): first use races through a [`OnceLock`],
/// so concurrent callers can never construct two sources. The fingerprint is
/// a pure function of the declared configuration and is unaffected by
/// whether credentials have been retrieved.
pub struct RoleIdentity {
    spec: RoleIdentitySpec,
    sts: Arc<dyn AssumeRole>,
    provider: OnceLock<AssumeRoleProvider>,
}

impl RoleIdentity {
    /// Creates an identity from its declared configuration and the STS
    /// collaborator used to assume the role. No credential source is
    /// constructed until the first [`retrieve`](IdentityTypeProvider::retrieve).
    pub fn new(spec: RoleIdentitySpec, sts: Arc<dyn AssumeRole>) -> Self {
        Self {
            spec,
            sts,
            provider: OnceLock::new(),
        }
    }

    /// The declared configuration.
    pub fn spec(&self) -> &RoleIdentitySpec {
        &self.spec
    }

    /// Drops the constructed credential source, if any. The next
    /// [`retrieve`](IdentityTypeProvider::retrieve) rebuilds it from the
    /// declared configuration; until then the identity reports itself as
    /// expired.
    pub fn reset(&mut self) {
        let _ = self.provider.take();
    }

    fn provider(&self) -> &AssumeRoleProvider {
        self.provider
            .get_or_init(|| AssumeRoleProvider::new(&self.spec, Arc::clone(&self.sts)))
    }
}

impl IdentityTypeProvider for RoleIdentity {
    fn fingerprint(&self) -> Result<Fingerprint> {
        self.spec.fingerprint()
    }

    fn is_expired(&self) -> bool {
        match self.provider.get() {
            Some(provider) => provider.is_expired(),
            None => true,
        }
    }

    fn retrieve(&self) -> Result<Credentials> {
        self.provider().retrieve()
    }
}

impl std::fmt::Debug for RoleIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleIdentity")
            .field("spec", &self.spec)
            .field("constructed", &self.provider.get().is_some())
            .finish_non_exhaustive()
    }
}
