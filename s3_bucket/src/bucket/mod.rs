//! Bucket facade over the S3 client

mod objects;
mod presign;

use std::fmt;
use std::sync::Arc;

use aws_sdk_s3::{
    operation::{
        create_bucket::CreateBucketOutput, delete_bucket::DeleteBucketOutput,
        list_buckets::ListBucketsOutput,
    },
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client as S3Client,
};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

pub use objects::{object_url, UploadedObject};
pub use presign::PresignedUrl;

use crate::{
    params::non_empty, AwsSessionFactory, BucketError, BucketResult, CreateBucketParams,
    DeleteBucketParams, SessionFactory,
};

/// Region that rejects an explicit location constraint on bucket creation
const DEFAULT_S3_REGION: &str = "us-east-1";

/// Serializable bucket identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketIdentity {
    /// Bucket name
    #[serde(default)]
    pub name: Option<String>,
    /// Region the bucket lives in
    #[serde(default)]
    pub region: Option<String>,
}

/// An S3 bucket and the lazily created client used to reach it
///
/// The client is created on the first operation that needs it and reused
/// afterwards. Concurrent first calls create at most one client.
pub struct Bucket {
    name: Option<String>,
    region: Option<String>,
    client: OnceCell<Arc<S3Client>>,
    sessions: Arc<dyn SessionFactory>,
}

impl Default for Bucket {
    fn default() -> Self {
        Self {
            name: None,
            region: None,
            client: OnceCell::new(),
            sessions: Arc::new(AwsSessionFactory::default()),
        }
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("has_client", &self.client.initialized())
            .finish_non_exhaustive()
    }
}

impl From<BucketIdentity> for Bucket {
    fn from(identity: BucketIdentity) -> Self {
        Self {
            name: identity.name,
            region: identity.region,
            ..Self::default()
        }
    }
}

impl Bucket {
    /// Creates a bucket handle using the default AWS configuration chain
    ///
    /// Sessions use [`AwsSessionFactory::default`], which ignores the `S3_*`
    /// environment variables. Pass [`AwsSessionFactory::from_env`] through
    /// [`Bucket::with_session_factory`] to apply them.
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self::default().with_name(name).with_region(region)
    }

    /// Sets the bucket name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the region used when a session is created
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Replaces the factory used to create the session
    #[must_use]
    pub fn with_session_factory(mut self, sessions: Arc<dyn SessionFactory>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Uses an existing client instead of creating a session
    #[must_use]
    pub fn with_client(mut self, client: Arc<S3Client>) -> Self {
        self.client = OnceCell::from(client);
        self
    }

    /// Bucket name, if set
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Configured region, if set
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Client handle, once a session exists
    #[must_use]
    pub fn client(&self) -> Option<&Arc<S3Client>> {
        self.client.get()
    }

    /// Name and region as a serializable record
    #[must_use]
    pub fn identity(&self) -> BucketIdentity {
        BucketIdentity {
            name: self.name.clone(),
            region: self.region.clone(),
        }
    }

    /// Returns the bucket's client, creating the session if needed
    ///
    /// Once a client exists it is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::EmptyInput` if no client exists and no region is set
    /// Returns `BucketError::MissingField("Region")` if no client exists and the region is empty
    /// Returns any error produced by the session factory
    pub async fn new_session(&self) -> BucketResult<Arc<S3Client>> {
        if !self.client.initialized() && self.region.is_none() {
            return Err(BucketError::EmptyInput);
        }
        self.session().await.map(Arc::clone)
    }

    /// Lists every bucket visible to this bucket's session
    ///
    /// # Errors
    ///
    /// Returns `BucketError::MissingField("Region")` if no session can be created
    /// Returns `BucketError::Upstream` if the `ListBuckets` call fails
    pub async fn list_buckets(&self) -> BucketResult<ListBucketsOutput> {
        let client = self.session().await?;

        debug!("Listing buckets");
        Ok(client.list_buckets().send().await?)
    }

    /// Creates the bucket
    ///
    /// Outside `us-east-1` a location constraint for the session region is
    /// added unless the raw request already carries a bucket configuration.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::MissingField` if the name or region is missing
    /// Returns `BucketError::Upstream` if the `CreateBucket` call fails
    pub async fn create(
        &self,
        params: Option<CreateBucketParams>,
    ) -> BucketResult<CreateBucketOutput> {
        let name = self.require_name()?;

        let client = self.session().await?;
        let mut input = params.and_then(|p| p.raw).unwrap_or_default();

        if input.get_create_bucket_configuration().is_none() {
            let region = self.effective_region(client);
            if !region.is_empty() && region != DEFAULT_S3_REGION {
                input = input.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(region))
                        .build(),
                );
            }
        }

        debug!("Creating bucket: {}", name);
        Ok(input.bucket(name).send_with(client).await?)
    }

    /// Deletes the bucket
    ///
    /// # Errors
    ///
    /// Returns `BucketError::MissingField` if the name or region is missing
    /// Returns `BucketError::Upstream` if the `DeleteBucket` call fails
    pub async fn delete(
        &self,
        params: Option<DeleteBucketParams>,
    ) -> BucketResult<DeleteBucketOutput> {
        let name = self.require_name()?;

        let client = self.session().await?;
        let input = params.and_then(|p| p.raw).unwrap_or_default();

        debug!("Deleting bucket: {}", name);
        Ok(input.bucket(name).send_with(client).await?)
    }

    fn require_name(&self) -> BucketResult<&str> {
        non_empty(self.name.as_deref()).ok_or(BucketError::MissingField("Name"))
    }

    /// Region is only needed while no client exists
    async fn session(&self) -> BucketResult<&Arc<S3Client>> {
        self.client
            .get_or_try_init(|| async {
                let region = non_empty(self.region.as_deref())
                    .ok_or(BucketError::MissingField("Region"))?;
                let client = self.sessions.create_session(region).await?;
                Ok::<_, BucketError>(Arc::new(client))
            })
            .await
    }

    /// Configured region, falling back to the client's own region
    fn effective_region<'a>(&'a self, client: &'a S3Client) -> &'a str {
        non_empty(self.region.as_deref())
            .or_else(|| client.config().region().map(|region| region.as_ref()))
            .unwrap_or_default()
    }
}
