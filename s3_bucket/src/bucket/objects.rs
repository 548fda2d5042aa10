//! Object operations

use aws_sdk_s3::{
    operation::{
        delete_object::DeleteObjectOutput, get_object::GetObjectOutput,
        list_objects_v2::ListObjectsV2Output, put_object::PutObjectOutput,
    },
    primitives::ByteStream,
};
use tracing::debug;

use super::Bucket;
use crate::{
    params::{narrow_limit, non_empty, require_field, RequiredParams},
    BucketError, BucketResult, DeleteObjectParams, GetObjectParams, ListObjectsParams,
    UploadObjectParams,
};

/// Result of an upload
#[derive(Debug)]
pub struct UploadedObject {
    /// Output returned by `PutObject`
    pub output: PutObjectOutput,
    /// Virtual-hosted URL of the uploaded object
    pub url: String,
}

/// Builds the virtual-hosted URL of an object
///
/// The key is inserted as is, without percent-encoding.
#[must_use]
pub fn object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

impl Bucket {
    /// Uploads `file` under `key`
    ///
    /// # Errors
    ///
    /// * `BucketError::MissingField` for a missing `Name`
    /// * `BucketError::MissingInput` / `BucketError::EmptyInput` for absent or unset params
    /// * `BucketError::MissingField` for a missing `File` or `Key`, then for a missing `Region`
    /// * `BucketError::Upstream` if the `PutObject` call fails
    pub async fn upload_object(
        &self,
        params: Option<UploadObjectParams>,
    ) -> BucketResult<UploadedObject> {
        let name = self.require_name()?;

        let params = UploadObjectParams::require(params)?;
        let file = params.file.ok_or(BucketError::MissingField("File"))?;
        let key = require_field(params.key, "Key")?;

        let client = self.session().await?;

        debug!("Uploading object: {} ({} bytes) to bucket: {}", key, file.len(), name);
        let output = params
            .raw
            .unwrap_or_default()
            .body(ByteStream::from(file))
            .bucket(name)
            .key(&key)
            .send_with(client)
            .await?;

        Ok(UploadedObject {
            output,
            url: object_url(name, self.effective_region(client), &key),
        })
    }

    /// Fetches the object stored under `key`
    ///
    /// The returned output carries the streaming body and object metadata.
    ///
    /// # Errors
    ///
    /// * `BucketError::MissingField` for a missing `Name`
    /// * `BucketError::MissingInput` / `BucketError::EmptyInput` for absent or unset params
    /// * `BucketError::MissingField` for a missing `Key`, then for a missing `Region`
    /// * `BucketError::Upstream` if the `GetObject` call fails
    pub async fn get_object(
        &self,
        params: Option<GetObjectParams>,
    ) -> BucketResult<GetObjectOutput> {
        let name = self.require_name()?;

        let params = GetObjectParams::require(params)?;
        let key = require_field(params.key, "Key")?;

        let client = self.session().await?;

        debug!("Getting object: {} from bucket: {}", key, name);
        Ok(params
            .raw
            .unwrap_or_default()
            .bucket(name)
            .key(key)
            .send_with(client)
            .await?)
    }

    /// Deletes the object stored under `key`
    ///
    /// # Errors
    ///
    /// * `BucketError::MissingField` for a missing `Name`
    /// * `BucketError::MissingInput` / `BucketError::EmptyInput` for absent or unset params
    /// * `BucketError::MissingField` for a missing `Key`, then for a missing `Region`
    /// * `BucketError::Upstream` if the `DeleteObject` call fails
    pub async fn delete_object(
        &self,
        params: Option<DeleteObjectParams>,
    ) -> BucketResult<DeleteObjectOutput> {
        let name = self.require_name()?;

        let params = DeleteObjectParams::require(params)?;
        let key = require_field(params.key, "Key")?;

        let client = self.session().await?;

        debug!("Deleting object: {} from bucket: {}", key, name);
        Ok(params
            .raw
            .unwrap_or_default()
            .bucket(name)
            .key(key)
            .send_with(client)
            .await?)
    }

    /// Lists a single page of objects
    ///
    /// Callers page through results with the continuation state of the
    /// returned output.
    ///
    /// # Errors
    ///
    /// * `BucketError::MissingField` for a missing `Name` or `Region`
    /// * `BucketError::Upstream` if the `ListObjectsV2` call fails
    pub async fn list_objects(
        &self,
        params: Option<ListObjectsParams>,
    ) -> BucketResult<ListObjectsV2Output> {
        let name = self.require_name()?;

        let params = params.unwrap_or_default();
        let client = self.session().await?;

        let mut input = params.raw.unwrap_or_default().bucket(name);
        if let Some(prefix) = non_empty(params.prefix.as_deref()) {
            input = input.prefix(prefix);
        }
        if let Some(page) = non_empty(params.page.as_deref()) {
            input = input.start_after(page);
        }
        if let Some(limit) = narrow_limit(params.limit) {
            input = input.max_keys(limit);
        }

        debug!("Listing objects in bucket: {}", name);
        Ok(input.send_with(client).await?)
    }
}
