//! Helpers for pointing tools at a local mock AWS endpoint.

use aws_config::retry::RetryConfig;
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{future, ProvideCredentials};
use aws_credential_types::Credentials;

use crate::aws::AwsClients;

/// Clients with static test credentials, no retries, talking to `endpoint`
pub async fn mock_clients(endpoint: &str) -> AwsClients {
    AwsClients::builder()
        .region("us-east-1")
        .endpoint_url(endpoint)
        .credentials_provider(Credentials::new(
            "AKIDTESTTESTTEST",
            "test-secret",
            None,
            None,
            "aws-mcp-tests",
        ))
        .retry_config(RetryConfig::disabled())
        .build()
        .await
}

/// Provider that behaves like an environment with no credentials configured
#[derive(Debug)]
pub struct NoCredentials;

impl ProvideCredentials for NoCredentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
            "no credentials found in environment",
        )))
    }
}

/// Clients whose credential resolution always fails
pub async fn clients_without_credentials(endpoint: &str) -> AwsClients {
    AwsClients::builder()
        .region("us-east-1")
        .endpoint_url(endpoint)
        .credentials_provider(NoCredentials)
        .retry_config(RetryConfig::disabled())
        .build()
        .await
}
