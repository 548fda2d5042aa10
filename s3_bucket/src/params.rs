//! Per-operation parameter types
//!
//! Every parameter type carries its own fields plus an optional `raw` override,
//! the SDK's native request builder. The bucket starts from the override and
//! stamps the fields it owns last, so bucket name and key always win.

use std::time::Duration;

use aws_sdk_s3::{
    operation::{
        create_bucket::builders::CreateBucketInputBuilder,
        delete_bucket::builders::DeleteBucketInputBuilder,
        delete_object::builders::DeleteObjectInputBuilder,
        get_object::builders::GetObjectInputBuilder,
        list_objects_v2::builders::ListObjectsV2InputBuilder,
        put_object::builders::PutObjectInputBuilder,
    },
    presigning::PresigningConfigBuilder,
};

use crate::{BucketError, BucketResult};

/// Parameters for [`Bucket::create`](crate::Bucket::create)
#[derive(Debug, Default)]
pub struct CreateBucketParams {
    /// Caller-populated request; the bucket name is overwritten
    pub raw: Option<CreateBucketInputBuilder>,
}

/// Parameters for [`Bucket::delete`](crate::Bucket::delete)
#[derive(Debug, Default)]
pub struct DeleteBucketParams {
    /// Caller-populated request; the bucket name is overwritten
    pub raw: Option<DeleteBucketInputBuilder>,
}

/// Parameters for [`Bucket::upload_object`](crate::Bucket::upload_object)
#[derive(Debug, Default)]
pub struct UploadObjectParams {
    /// Object content, may be zero length
    pub file: Option<Vec<u8>>,
    /// Object key
    pub key: Option<String>,
    /// Caller-populated request; body, bucket and key are overwritten
    pub raw: Option<PutObjectInputBuilder>,
}

/// Parameters for [`Bucket::get_object`](crate::Bucket::get_object)
#[derive(Debug, Default)]
pub struct GetObjectParams {
    /// Object key
    pub key: Option<String>,
    /// Caller-populated request; bucket and key are overwritten
    pub raw: Option<GetObjectInputBuilder>,
}

/// Parameters for [`Bucket::delete_object`](crate::Bucket::delete_object)
#[derive(Debug, Default)]
pub struct DeleteObjectParams {
    /// Object key
    pub key: Option<String>,
    /// Caller-populated request; bucket and key are overwritten
    pub raw: Option<DeleteObjectInputBuilder>,
}

/// Parameters for [`Bucket::list_objects`](crate::Bucket::list_objects)
#[derive(Debug, Default)]
pub struct ListObjectsParams {
    /// Only return keys starting with this prefix
    pub prefix: Option<String>,
    /// Start listing after this key
    pub page: Option<String>,
    /// Maximum number of keys in the page, narrowed to `i32`
    pub limit: Option<usize>,
    /// Caller-populated request; bucket and any set field above are overwritten
    pub raw: Option<ListObjectsV2InputBuilder>,
}

/// Parameters for [`Bucket::presign_get`](crate::Bucket::presign_get)
#[derive(Debug, Default)]
pub struct PresignGetParams {
    /// Object key
    pub key: Option<String>,
    /// How long the presigned URL stays valid
    pub duration: Option<Duration>,
    /// Caller-populated presigning settings; the expiry is overwritten
    pub raw: Option<PresigningConfigBuilder>,
}

/// Parameters for [`Bucket::presign_put`](crate::Bucket::presign_put)
#[derive(Debug, Default)]
pub struct PresignPutParams {
    /// Object key
    pub key: Option<String>,
    /// How long the presigned URL stays valid
    pub duration: Option<Duration>,
    /// Caller-populated presigning settings; the expiry is overwritten
    pub raw: Option<PresigningConfigBuilder>,
}

/// Parameter objects that must be provided and must not be entirely unset
pub(crate) trait RequiredParams: Sized {
    fn is_empty(&self) -> bool;

    /// Absent parameters fail before empty ones
    fn require(params: Option<Self>) -> BucketResult<Self> {
        let params = params.ok_or(BucketError::MissingInput)?;
        if params.is_empty() {
            return Err(BucketError::EmptyInput);
        }
        Ok(params)
    }
}

impl RequiredParams for UploadObjectParams {
    fn is_empty(&self) -> bool {
        self.file.is_none() && self.key.is_none() && self.raw.is_none()
    }
}

impl RequiredParams for GetObjectParams {
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.raw.is_none()
    }
}

impl RequiredParams for DeleteObjectParams {
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.raw.is_none()
    }
}

impl RequiredParams for PresignGetParams {
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.duration.is_none() && self.raw.is_none()
    }
}

impl RequiredParams for PresignPutParams {
    fn is_empty(&self) -> bool {
        self.key.is_none() && self.duration.is_none() && self.raw.is_none()
    }
}

/// Treats empty strings like absent ones
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|val| !val.is_empty())
}

pub(crate) fn require_field(value: Option<String>, field: &'static str) -> BucketResult<String> {
    value
        .filter(|val| !val.is_empty())
        .ok_or(BucketError::MissingField(field))
}

pub(crate) fn require_duration(value: Option<Duration>) -> BucketResult<Duration> {
    value
        .filter(|val| !val.is_zero())
        .ok_or(BucketError::MissingField("Duration"))
}

/// Narrows a page size to the SDK's `max_keys` width; zero means unset
pub(crate) fn narrow_limit(limit: Option<usize>) -> Option<i32> {
    limit
        .filter(|val| *val != 0)
        .map(|val| i32::try_from(val).unwrap_or(i32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_params_fail_before_empty_params() {
        let err = UploadObjectParams::require(None).unwrap_err();
        assert!(matches!(err, BucketError::MissingInput));

        let err = UploadObjectParams::require(Some(UploadObjectParams::default())).unwrap_err();
        assert!(matches!(err, BucketError::EmptyInput));
    }

    #[test]
    fn test_raw_override_alone_is_not_empty() {
        let params = GetObjectParams {
            key: None,
            raw: Some(GetObjectInputBuilder::default()),
        };

        assert!(GetObjectParams::require(Some(params)).is_ok());
    }

    #[test]
    fn test_zero_length_file_counts_as_present() {
        let params = UploadObjectParams {
            file: Some(Vec::new()),
            ..Default::default()
        };

        assert!(!params.is_empty());
    }

    #[test]
    fn test_require_field_rejects_empty_string() {
        let err = require_field(Some(String::new()), "Key").unwrap_err();
        assert_eq!(err.to_string(), "empty 'Key' param");

        let err = require_field(None, "Key").unwrap_err();
        assert_eq!(err.to_string(), "empty 'Key' param");

        assert_eq!(require_field(Some("k1".into()), "Key").unwrap(), "k1");
    }

    #[test]
    fn test_require_duration_rejects_zero() {
        let err = require_duration(Some(Duration::ZERO)).unwrap_err();
        assert_eq!(err.to_string(), "empty 'Duration' param");

        assert_eq!(
            require_duration(Some(Duration::from_secs(60))).unwrap(),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_narrow_limit() {
        assert_eq!(narrow_limit(None), None);
        assert_eq!(narrow_limit(Some(0)), None);
        assert_eq!(narrow_limit(Some(5)), Some(5));
        assert_eq!(narrow_limit(Some(usize::MAX)), Some(i32::MAX));
    }
}
