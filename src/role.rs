use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Minimum role session duration accepted by STS, in seconds.
pub const MIN_SESSION_DURATION_SECS: u32 = 900;

/// Maximum role session duration accepted by STS, in seconds.
pub const MAX_SESSION_DURATION_SECS: u32 = 43_200;

/// Declarative configuration for assuming an IAM role.
///
/// Field names follow the persisted schema this configuration is loaded
/// from. Bounds (session duration 900–43200 seconds, character sets) are
/// enforced by the admission layer that owns the schema; this crate assumes
/// well-formed input and does not re-validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// The Amazon Resource Name (ARN) of the role to assume.
    #[serde(rename = "roleARN")]
    pub role_arn: String,

    /// An identifier for the assumed role session.
    #[serde(default, rename = "sessionName")]
    pub session_name: String,

    /// The duration, in seconds, of the role session before it is renewed.
    /// Zero means the service default.
    #[serde(default, rename = "durationSeconds")]
    pub duration_seconds: u32,

    /// An IAM policy in JSON format to use as an inline session policy.
    #[serde(default, rename = "inlinePolicy")]
    pub inline_policy: String,

    /// ARNs of the IAM managed policies to use as managed session policies.
    /// The policies must exist in the same account as the role.
    #[serde(default, rename = "policyARNs")]
    pub policy_arns: Vec<String>,
}

/// Declarative configuration for a role-assumption identity.
///
/// Embeds [`RoleConfig`] and adds the cross-account and session-tagging
/// fields. Session tags are kept in a [`BTreeMap`] so that serialization,
/// and therefore the fingerprint, is independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleIdentitySpec {
    #[serde(flatten)]
    pub role: RoleConfig,

    /// A unique identifier that might be required when assuming a role in
    /// another account.
    #[serde(default, rename = "externalID")]
    pub external_id: String,

    /// Session tags to pass: each tag is a key name and an associated value.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Keys of session tags to set as transitive. Transitive tags persist
    /// into subsequent role-chaining sessions. Expected to be a subset of
    /// the session tag keys; enforcing that is the caller's responsibility.
    #[serde(default, rename = "transitiveTags")]
    pub transitive_tags: Vec<String>,

    /// An optional reference to another credential to use when assuming the
    /// role, recorded as the session's source identity.
    #[serde(default, rename = "controlPlaneRef")]
    pub source_identity_secret_name: String,
}
