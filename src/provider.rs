//! Lazily constructed credential source for a role-assumption identity.
//!
//! [`AssumeRoleProvider`] translates a [`RoleIdentitySpec`] into the
//! parameters of the remote AssumeRole operation, caches the credentials it
//! obtains, and refreshes them once they expire. The remote call itself sits
//! behind the [`AssumeRole`] seam so the construction and caching logic can
//! be tested without a network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::Result;
use crate::response::Credentials;
use crate::role::RoleIdentitySpec;

/// A session tag attached to the assumed-role session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// A reference to an IAM managed policy used as a managed session policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDescriptor {
    pub arn: String,
}

/// Parameters for one AssumeRole call, assembled from an identity's
/// declared configuration.
#[derive(Debug, Clone)]
pub struct AssumeRoleParams {
    pub role_arn: String,
    pub session_name: String,
    /// Zero means the service default duration.
    pub duration: Duration,
    /// Passed through even when empty; an empty document means "no inline
    /// policy" to the remote service.
    pub policy: String,
    pub policy_arns: Vec<PolicyDescriptor>,
    pub tags: Vec<Tag>,
    pub transitive_tag_keys: Vec<String>,
    pub external_id: String,
    pub source_identity: String,
}

impl AssumeRoleParams {
    /// Assembles call parameters from the declared configuration.
    ///
    /// Attached policy ARNs and transitive tag keys keep their input order;
    /// session tags come out in key order because the spec stores them in an
    /// ordered map. This is pure field remapping and cannot fail.
    pub fn from_spec(spec: &RoleIdentitySpec) -> Self {
        let policy_arns = spec
            .role
            .policy_arns
            .iter()
            .map(|arn| PolicyDescriptor { arn: arn.clone() })
            .collect();
        let tags = spec
            .tags
            .iter()
            .map(|(key, value)| Tag {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Self {
            role_arn: spec.role.role_arn.clone(),
            session_name: spec.role.session_name.clone(),
            duration: Duration::from_secs(u64::from(spec.role.duration_seconds)),
            policy: spec.role.inline_policy.clone(),
            policy_arns,
            tags,
            transitive_tag_keys: spec.transitive_tags.clone(),
            external_id: spec.external_id.clone(),
            source_identity: spec.source_identity_secret_name.clone(),
        }
    }
}

/// The external role-assumption operation.
///
/// Implemented by [`StsClient`](crate::StsClient) for real calls and by test
/// doubles in unit tests. Implementations perform no retries; errors
/// propagate to the caller unwrapped.
pub trait AssumeRole: Send + Sync {
    /// Assumes the role described by `params` and returns temporary
    /// credentials.
    fn assume_role(&self, params: &AssumeRoleParams) -> Result<Credentials>;
}

/// Credential source bound to one identity.
///
/// Owned exclusively by the identity that built it; never shared across
/// identities. The cache sits behind a mutex so concurrent fetches observe a
/// consistent source; a fetch that triggers a refresh holds the lock for the
/// duration of the remote call, so concurrent callers wait rather than issue
/// duplicate calls.
pub struct AssumeRoleProvider {
    params: AssumeRoleParams,
    sts: Arc<dyn AssumeRole>,
    cache: Mutex<Option<Credentials>>,
}

impl AssumeRoleProvider {
    /// Builds a provider from an identity's declared configuration and the
    /// injected STS collaborator. Does not contact the network.
    pub fn new(spec: &RoleIdentitySpec, sts: Arc<dyn AssumeRole>) -> Self {
        Self {
            params: AssumeRoleParams::from_spec(spec),
            sts,
            cache: Mutex::new(None),
        }
    }

    /// Returns `true` if no credentials are cached or the cached credentials
    /// are past expiry. Never fails.
    pub fn is_expired(&self) -> bool {
        match self.cache.lock() {
            Ok(cache) => match cache.as_ref() {
                Some(creds) => creds.is_expired(),
                None => true,
            },
            // A poisoned cache means a previous fetch panicked; treat the
            // cached value as unusable.
            Err(_) => true,
        }
    }

    /// Returns the current credentials, calling the remote service if none
    /// are cached or the cached credentials have expired.
    pub fn retrieve(&self) -> Result<Credentials> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(creds) = cache.as_ref() {
            if !creds.is_expired() {
                return Ok(creds.clone());
            }
        }
        let fresh = self.sts.assume_role(&self.params)?;
        *cache = Some(fresh.clone());
        Ok(fresh)
    }

    /// The call parameters this provider was built with.
    pub fn params(&self) -> &AssumeRoleParams {
        &self.params
    }
}

impl std::fmt::Debug for AssumeRoleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssumeRoleProvider")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::role::RoleConfig;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn demo_spec() -> RoleIdentitySpec {
        RoleIdentitySpec {
            role: RoleConfig {
                role_arn: "arn:aws:iam::123456789012:role/demo".to_string(),
                session_name: "demo-session".to_string(),
                duration_seconds: 3600,
                inline_policy: String::new(),
                policy_arns: vec![
                    "arn:aws:iam::123456789012:policy/first".to_string(),
                    "arn:aws:iam::123456789012:policy/second".to_string(),
                ],
            },
            external_id: "ext-1".to_string(),
            tags: [("team", "platform"), ("env", "prod")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            transitive_tags: vec!["team".to_string()],
            source_identity_secret_name: "control-plane-creds".to_string(),
        }
    }

    struct CountingSts {
        calls: AtomicUsize,
        expiry_offset_secs: i64,
        fail: bool,
    }

    impl CountingSts {
        fn fresh() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                expiry_offset_secs: 3600,
                fail: false,
            }
        }

        fn already_expired() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                expiry_offset_secs: -60,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                expiry_offset_secs: 0,
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AssumeRole for CountingSts {
        fn assume_role(&self, params: &AssumeRoleParams) -> Result<Credentials> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Api {
                    request_id: "req-fail".to_string(),
                    code: "AccessDenied".to_string(),
                    message: format!("cannot assume {}", params.role_arn),
                });
            }
            Ok(Credentials::new(
                "ASIAEXAMPLE",
                "secret",
                "token",
                Utc::now() + chrono::Duration::seconds(self.expiry_offset_secs),
            ))
        }
    }

    #[test]
    fn params_preserve_policy_arn_order() {
        let params = AssumeRoleParams::from_spec(&demo_spec());
        assert_eq!(params.policy_arns[0].arn, "arn:aws:iam::123456789012:policy/first");
        assert_eq!(params.policy_arns[1].arn, "arn:aws:iam::123456789012:policy/second");
    }

    #[test]
    fn params_tags_in_key_order() {
        let params = AssumeRoleParams::from_spec(&demo_spec());
        let keys: Vec<&str> = params.tags.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["env", "team"]);
    }

    #[test]
    fn params_pass_empty_policy_through() {
        let params = AssumeRoleParams::from_spec(&demo_spec());
        assert_eq!(params.policy, "");
    }

    #[test]
    fn params_convert_duration() {
        let params = AssumeRoleParams::from_spec(&demo_spec());
        assert_eq!(params.duration, Duration::from_secs(3600));
    }

    #[test]
    fn provider_starts_expired() {
        let provider = AssumeRoleProvider::new(&demo_spec(), Arc::new(CountingSts::fresh()));
        assert!(provider.is_expired());
    }

    #[test]
    fn retrieve_caches_until_expiry() {
        let sts = Arc::new(CountingSts::fresh());
        let provider = AssumeRoleProvider::new(&demo_spec(), sts.clone());

        let first = provider.retrieve().unwrap();
        let second = provider.retrieve().unwrap();

        assert_eq!(sts.call_count(), 1);
        assert_eq!(first.access_key_id, second.access_key_id);
        assert!(!provider.is_expired());
    }

    #[test]
    fn retrieve_refreshes_expired_credentials() {
        let sts = Arc::new(CountingSts::already_expired());
        let provider = AssumeRoleProvider::new(&demo_spec(), sts.clone());

        provider.retrieve().unwrap();
        assert!(provider.is_expired());
        provider.retrieve().unwrap();

        assert_eq!(sts.call_count(), 2);
    }

    #[test]
    fn retrieve_propagates_remote_errors() {
        let sts = Arc::new(CountingSts::failing());
        let provider = AssumeRoleProvider::new(&demo_spec(), sts.clone());

        let err = provider.retrieve().unwrap_err();
        assert_eq!(err.error_code(), Some("AccessDenied"));
        // Failure leaves nothing cached.
        assert!(provider.is_expired());
    }
}
