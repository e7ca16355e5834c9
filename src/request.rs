//! Query-parameter assembly and request signing for the STS AssumeRole call.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::config::StsConfig;
use crate::credential::AccessKey;
use crate::error::{Error, Result};
use crate::provider::AssumeRoleParams;
use crate::sign::{percent_encode, sign_request, SignedHeaders};

/// Cached regex for role ARN validation.
///
/// ARN format: `arn:{partition}:iam::{account-id}:role/{role-name}` where
/// account-id is 12 digits and role-name may contain a path.
static ROLE_ARN_REGEX: OnceLock<Regex> = OnceLock::new();

fn role_arn_regex() -> &'static Regex {
    ROLE_ARN_REGEX.get_or_init(|| {
        Regex::new(r"^arn:aws[a-zA-Z-]*:iam::\d{12}:role/[\w+=,.@/-]+$")
            .expect("invalid ROLE_ARN_REGEX pattern")
    })
}

/// Validates a role ARN format before dispatching a request.
pub(crate) fn validate_role_arn(arn: &str) -> Result<()> {
    if !role_arn_regex().is_match(arn) {
        return Err(Error::Validation(format!(
            "invalid RoleArn format '{}'. Expected: arn:aws:iam::{{12 digit account id}}:role/{{role name}}",
            arn
        )));
    }
    Ok(())
}

/// Extracts the host (with port, if any) from an endpoint URL for use in the
/// signed `Host` header.
pub(crate) fn host_from_endpoint(endpoint: &str) -> Result<String> {
    let without_scheme = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .ok_or_else(|| Error::Config(format!("endpoint '{}' has no http(s) scheme", endpoint)))?;
    let host = without_scheme
        .split('/')
        .next()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::Config(format!("endpoint '{}' has no host", endpoint)))?;
    Ok(host.to_string())
}

/// Flattens AssumeRole call parameters into Query API form parameters.
///
/// List parameters use the Query API `member` encoding
/// (`Tags.member.1.Key`, `PolicyArns.member.1.arn`, ...). Optional scalars
/// are omitted when empty; a zero duration is omitted so the service applies
/// its default.
pub(crate) fn query_params(
    params: &AssumeRoleParams,
    api_version: &str,
) -> BTreeMap<String, String> {
    let mut all = BTreeMap::new();
    all.insert("Action".to_string(), "AssumeRole".to_string());
    all.insert("Version".to_string(), api_version.to_string());
    all.insert("RoleArn".to_string(), params.role_arn.clone());
    all.insert("RoleSessionName".to_string(), params.session_name.clone());

    let duration_secs = params.duration.as_secs();
    if duration_secs > 0 {
        all.insert("DurationSeconds".to_string(), duration_secs.to_string());
    }
    // STS rejects an empty Policy parameter; absence means "no inline policy".
    if !params.policy.is_empty() {
        all.insert("Policy".to_string(), params.policy.clone());
    }
    if !params.external_id.is_empty() {
        all.insert("ExternalId".to_string(), params.external_id.clone());
    }
    if !params.source_identity.is_empty() {
        all.insert("SourceIdentity".to_string(), params.source_identity.clone());
    }

    for (i, descriptor) in params.policy_arns.iter().enumerate() {
        all.insert(
            format!("PolicyArns.member.{}.arn", i + 1),
            descriptor.arn.clone(),
        );
    }
    for (i, tag) in params.tags.iter().enumerate() {
        all.insert(format!("Tags.member.{}.Key", i + 1), tag.key.clone());
        all.insert(format!("Tags.member.{}.Value", i + 1), tag.value.clone());
    }
    for (i, key) in params.transitive_tag_keys.iter().enumerate() {
        all.insert(format!("TransitiveTagKeys.member.{}", i + 1), key.clone());
    }

    all
}

/// Builds the signed request body and headers for one AssumeRole call.
///
/// 1. Validates the role ARN.
/// 2. Flattens the parameters into sorted form parameters.
/// 3. Percent-encodes them into the request body.
/// 4. Computes SigV4 headers over the body.
pub(crate) fn build_signed_request(
    params: &AssumeRoleParams,
    credential: &AccessKey,
    config: &StsConfig,
) -> Result<(String, SignedHeaders)> {
    validate_role_arn(&params.role_arn)?;

    let all_params = query_params(params, config.api_version);
    let body = all_params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let host = host_from_endpoint(&config.endpoint)?;
    let headers = sign_request(&host, &body, credential, &config.region, Utc::now())?;
    Ok((body, headers))
}
