//! AWS client construction shared by every tool.
//!
//! Credentials, profile and region come from the standard AWS resolution chain
//! (environment variables, `~/.aws/config`, SSO, instance roles). The builder only
//! adds explicit overrides on top of that chain.

use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_types::region::Region;

use aws_mcp_core::ToolError;

/// Region used when neither the builder nor the environment names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// S3, DynamoDB and STS clients built from one resolved AWS configuration.
///
/// Clients are cheap to clone and safe to share between concurrent sessions.
#[derive(Debug, Clone)]
pub struct AwsClients {
    s3: aws_sdk_s3::Client,
    dynamodb: aws_sdk_dynamodb::Client,
    sts: aws_sdk_sts::Client,
    region: Option<String>,
    profile: Option<String>,
}

/// Account and principal the resolved credentials belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
}

/// Builder for [`AwsClients`].
///
/// # Example
///
/// ```no_run
/// use aws_mcp_tools::aws::AwsClients;
///
/// # async fn example() {
/// let clients = AwsClients::builder()
///     .profile("demo")
///     .region("eu-west-1")
///     .build()
///     .await;
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AwsClientsBuilder {
    profile: Option<String>,
    region: Option<String>,
    endpoint_url: Option<String>,
    credentials_provider: Option<SharedCredentialsProvider>,
    retry_config: Option<RetryConfig>,
    force_path_style: bool,
}

impl AwsClientsBuilder {
    /// Use a named profile from the shared AWS config files
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Region to use instead of the one found in the environment
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Send every request to this endpoint (LocalStack, test servers).
    ///
    /// Also switches S3 to path-style addressing.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self.force_path_style = true;
        self
    }

    /// Skip the default credential chain and use this provider
    pub fn credentials_provider(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(provider));
        self
    }

    /// Override the SDK retry policy (SDK standard retries otherwise)
    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = Some(retry_config);
        self
    }

    /// Resolve configuration and build the clients.
    ///
    /// Credentials are resolved lazily, per request, so a missing or invalid
    /// credential surfaces as an error on each tool call rather than here.
    pub async fn build(self) -> AwsClients {
        let region = RegionProviderChain::first_try(self.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(url) = &self.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        if let Some(provider) = self.credentials_provider {
            loader = loader.credentials_provider(provider);
        }
        if let Some(retry_config) = self.retry_config {
            loader = loader.retry_config(retry_config);
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(self.force_path_style)
            .build();

        let clients = AwsClients {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            dynamodb: aws_sdk_dynamodb::Client::new(&sdk_config),
            sts: aws_sdk_sts::Client::new(&sdk_config),
            region: sdk_config.region().map(|r| r.to_string()),
            profile: self.profile,
        };

        tracing::debug!(
            region = clients.region.as_deref().unwrap_or("unset"),
            profile = clients.profile.as_deref().unwrap_or("default chain"),
            "AWS clients configured"
        );

        clients
    }
}

impl AwsClients {
    /// Build clients from the default AWS configuration chain
    pub async fn from_env() -> Self {
        Self::builder().build().await
    }

    pub fn builder() -> AwsClientsBuilder {
        AwsClientsBuilder::default()
    }

    pub fn s3(&self) -> &aws_sdk_s3::Client {
        &self.s3
    }

    pub fn dynamodb(&self) -> &aws_sdk_dynamodb::Client {
        &self.dynamodb
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Ask STS who the resolved credentials belong to.
    ///
    /// Fails with a credential-related error when no usable credentials exist.
    pub async fn caller_identity(&self) -> Result<CallerIdentity, ToolError> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| sdk_error("STS GetCallerIdentity failed", e))?;

        Ok(CallerIdentity {
            account: output.account().unwrap_or_default().to_string(),
            arn: output.arn().unwrap_or_default().to_string(),
        })
    }
}

/// Render an SDK error with its full source chain
pub(crate) fn sdk_error<E>(context: &str, err: E) -> ToolError
where
    E: std::error::Error,
{
    ToolError::Aws(format!(
        "{}: {}",
        context,
        aws_sdk_s3::error::DisplayErrorContext(err)
    ))
}
