//! Session creation and account-level operations

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{operation::list_buckets::ListBucketsOutput, Client as S3Client};
use tracing::{debug, info};

use crate::{params::non_empty, BucketError, BucketResult, SessionConfig};

/// Creates S3 clients for a region
///
/// Ambient credentials and configuration are read here, not by the bucket.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Builds a new client bound to `region`
    ///
    /// # Errors
    ///
    /// Returns `BucketError::ConfigError` if the configuration cannot be loaded
    async fn create_session(&self, region: &str) -> BucketResult<S3Client>;
}

/// Session factory backed by the default AWS configuration chain
#[derive(Debug, Clone, Default)]
pub struct AwsSessionFactory {
    config: SessionConfig,
}

impl AwsSessionFactory {
    /// Creates a factory with explicit SDK settings
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Creates a factory configured from the environment
    ///
    /// # Errors
    ///
    /// Returns `BucketError::ConfigError` if an environment variable is malformed
    pub fn from_env() -> BucketResult<Self> {
        SessionConfig::from_env().map(Self::new)
    }

    /// SDK settings applied to every session
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[async_trait]
impl SessionFactory for AwsSessionFactory {
    async fn create_session(&self, region: &str) -> BucketResult<S3Client> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .retry_config(self.config.retry_config())
            .timeout_config(self.config.timeout_config());

        if let Some(endpoint_url) = &self.config.endpoint_url {
            if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
                return Err(BucketError::ConfigError(format!(
                    "endpoint url must start with http:// or https://: {endpoint_url}"
                )));
            }
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        // LocalStack and most S3-compatible stores need path-style addressing
        if self.config.force_path_style {
            builder.set_force_path_style(Some(true));
        }

        info!(
            "Created S3 session for region: {} (endpoint override: {:?})",
            region, self.config.endpoint_url
        );

        Ok(S3Client::from_conf(builder.build()))
    }
}

/// Parameters for [`new_session`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSessionParams {
    /// Region the client is bound to
    pub region: Option<String>,
}

/// Parameters for [`list_buckets`]
#[derive(Debug, Clone, Default)]
pub struct ListBucketsParams {
    /// Existing client to reuse; a new session is created when absent
    pub client: Option<Arc<S3Client>>,
    /// Region for the new session, required when `client` is absent
    pub region: Option<String>,
}

/// Creates a standalone S3 client
///
/// # Errors
///
/// * `BucketError::MissingInput` if `params` is `None`
/// * `BucketError::EmptyInput` if no field is set
/// * `BucketError::MissingField("Region")` if the region is empty
/// * Any error returned by the session factory
pub async fn new_session(
    params: Option<NewSessionParams>,
    sessions: &dyn SessionFactory,
) -> BucketResult<S3Client> {
    let params = params.ok_or(BucketError::MissingInput)?;
    if params == NewSessionParams::default() {
        return Err(BucketError::EmptyInput);
    }
    let region = non_empty(params.region.as_deref()).ok_or(BucketError::MissingField("Region"))?;

    sessions.create_session(region).await
}

/// Lists every bucket owned by the authenticated account
///
/// # Errors
///
/// * `BucketError::MissingInput` if `params` is `None`
/// * `BucketError::EmptyInput` if neither a client nor a region is given
/// * `BucketError::MissingField("Region")` if no client is given and the region is empty
/// * `BucketError::Upstream` if the `ListBuckets` call fails
pub async fn list_buckets(
    params: Option<ListBucketsParams>,
    sessions: &dyn SessionFactory,
) -> BucketResult<ListBucketsOutput> {
    let params = params.ok_or(BucketError::MissingInput)?;

    let client = match (params.client, params.region) {
        (Some(client), _) => client,
        (None, None) => return Err(BucketError::EmptyInput),
        (None, Some(region)) => {
            let region =
                non_empty(Some(region.as_str())).ok_or(BucketError::MissingField("Region"))?;
            Arc::new(sessions.create_session(region).await?)
        }
    };

    debug!("Listing buckets");
    Ok(client.list_buckets().send().await?)
}
