use std::time::Duration;

/// Configuration for the STS client.
#[derive(Debug, Clone)]
pub struct StsConfig {
    /// STS API endpoint URL.
    pub endpoint: String,

    /// AWS region used in the signing credential scope.
    pub region: String,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// Query API version (always "2011-06-15").
    pub(crate) api_version: &'static str,
}

impl Default for StsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sts.amazonaws.com".to_string(),
            region: "us-east-1".to_string(),
            timeout: Duration::from_secs(30),
            api_version: "2011-06-15",
        }
    }
}

impl StsConfig {
    /// Sets a custom endpoint, e.g. a regional or VPC endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the region used in the signing credential scope.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
