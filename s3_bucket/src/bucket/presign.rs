//! Presigned GET and PUT requests

use std::time::Duration;

use aws_sdk_s3::presigning::{PresignedRequest, PresigningConfig, PresigningConfigBuilder};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::Bucket;
use crate::{
    error::UpstreamError,
    params::{require_duration, require_field, RequiredParams},
    BucketResult, PresignGetParams, PresignPutParams,
};

/// Presigned request with expiration information
#[derive(Debug)]
pub struct PresignedUrl {
    /// URL, method and headers produced by the SDK presigner
    pub request: PresignedRequest,
    /// UTC instant when the request stops being valid
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    /// The presigned URL
    #[must_use]
    pub fn url(&self) -> &str {
        self.request.uri()
    }
}

fn expires_at(config: &PresigningConfig) -> DateTime<Utc> {
    DateTime::<Utc>::from(config.start_time() + config.expires())
}

/// Stamps the expiry over the caller's presigning settings
fn presigning_config(
    raw: Option<PresigningConfigBuilder>,
    duration: Duration,
) -> BucketResult<PresigningConfig> {
    Ok(raw.unwrap_or_default().expires_in(duration).build()?)
}

impl Bucket {
    /// Presigns a `GetObject` request for `key`
    ///
    /// # Errors
    ///
    /// * `BucketError::MissingField` for a missing `Name`
    /// * `BucketError::MissingInput` / `BucketError::EmptyInput` for absent or unset params
    /// * `BucketError::MissingField` for a missing `Key` or a missing or zero `Duration`
    /// * `BucketError::PresignConfig` if the SDK rejects the expiry
    /// * `BucketError::MissingField` for a missing `Region` when no client exists
    /// * `BucketError::Upstream` if presigning fails
    pub async fn presign_get(
        &self,
        params: Option<PresignGetParams>,
    ) -> BucketResult<PresignedUrl> {
        let name = self.require_name()?;

        let params = PresignGetParams::require(params)?;
        let key = require_field(params.key, "Key")?;
        let duration = require_duration(params.duration)?;
        let config = presigning_config(params.raw, duration)?;
        let expires_at = expires_at(&config);

        let client = self.session().await?;

        debug!(
            "Presigning GET for object: {} in bucket: {} valid for {:?}",
            key, name, duration
        );
        let request = client
            .get_object()
            .bucket(name)
            .key(key)
            .presigned(config)
            .await
            .map_err(UpstreamError::PresignGetObject)?;

        Ok(PresignedUrl {
            request,
            expires_at,
        })
    }

    /// Presigns a `PutObject` request for `key`
    ///
    /// # Errors
    ///
    /// * `BucketError::MissingField` for a missing `Name`
    /// * `BucketError::MissingInput` / `BucketError::EmptyInput` for absent or unset params
    /// * `BucketError::MissingField` for a missing `Key` or a missing or zero `Duration`
    /// * `BucketError::PresignConfig` if the SDK rejects the expiry
    /// * `BucketError::MissingField` for a missing `Region` when no client exists
    /// * `BucketError::Upstream` if presigning fails
    pub async fn presign_put(
        &self,
        params: Option<PresignPutParams>,
    ) -> BucketResult<PresignedUrl> {
        let name = self.require_name()?;

        let params = PresignPutParams::require(params)?;
        let key = require_field(params.key, "Key")?;
        let duration = require_duration(params.duration)?;
        let config = presigning_config(params.raw, duration)?;
        let expires_at = expires_at(&config);

        let client = self.session().await?;

        debug!(
            "Presigning PUT for object: {} in bucket: {} valid for {:?}",
            key, name, duration
        );
        let request = client
            .put_object()
            .bucket(name)
            .key(key)
            .presigned(config)
            .await
            .map_err(UpstreamError::PresignPutObject)?;

        Ok(PresignedUrl {
            request,
            expires_at,
        })
    }
}
