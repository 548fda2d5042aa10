//! Error types for bucket operations

use aws_sdk_s3::{
    error::SdkError,
    operation::{
        create_bucket::CreateBucketError, delete_bucket::DeleteBucketError,
        delete_object::DeleteObjectError, get_object::GetObjectError,
        list_buckets::ListBucketsError, list_objects_v2::ListObjectsV2Error,
        put_object::PutObjectError,
    },
    presigning::PresigningConfigError,
};
use thiserror::Error;

/// Result type for bucket operations
pub type BucketResult<T> = Result<T, BucketError>;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// The parameter object itself was not provided
    #[error("nil input")]
    MissingInput,

    /// The parameter object was provided but every field is unset
    #[error("empty input")]
    EmptyInput,

    /// A required field is absent or empty
    #[error("empty '{0}' param")]
    MissingField(&'static str),

    /// Session configuration could not be loaded
    #[error("failed to load SDK config: {0}")]
    ConfigError(String),

    /// The presigning configuration was rejected by the SDK
    #[error("invalid presigning config: {0}")]
    PresignConfig(#[from] PresigningConfigError),

    /// The delegated S3 call failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failures returned by the S3 SDK, one variant per delegated operation
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// `ListBuckets` failed
    #[error("failed to list buckets: {0}")]
    ListBuckets(#[from] SdkError<ListBucketsError>),

    /// `CreateBucket` failed
    #[error("failed to create bucket: {0}")]
    CreateBucket(#[from] SdkError<CreateBucketError>),

    /// `DeleteBucket` failed
    #[error("failed to delete bucket: {0}")]
    DeleteBucket(#[from] SdkError<DeleteBucketError>),

    /// `PutObject` failed
    #[error("failed to upload object: {0}")]
    UploadObject(#[from] SdkError<PutObjectError>),

    /// `GetObject` failed
    #[error("failed to get object: {0}")]
    GetObject(#[from] SdkError<GetObjectError>),

    /// `DeleteObject` failed
    #[error("failed to delete object: {0}")]
    DeleteObject(#[from] SdkError<DeleteObjectError>),

    /// `ListObjectsV2` failed
    #[error("failed to list objects: {0}")]
    ListObjects(#[from] SdkError<ListObjectsV2Error>),

    /// Presigning a `GetObject` request failed
    #[error("failed to presign get object: {0}")]
    PresignGetObject(#[source] SdkError<GetObjectError>),

    /// Presigning a `PutObject` request failed
    #[error("failed to presign put object: {0}")]
    PresignPutObject(#[source] SdkError<PutObjectError>),
}

impl From<SdkError<ListBucketsError>> for BucketError {
    fn from(error: SdkError<ListBucketsError>) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<SdkError<CreateBucketError>> for BucketError {
    fn from(error: SdkError<CreateBucketError>) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<SdkError<DeleteBucketError>> for BucketError {
    fn from(error: SdkError<DeleteBucketError>) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<SdkError<PutObjectError>> for BucketError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<SdkError<GetObjectError>> for BucketError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<SdkError<DeleteObjectError>> for BucketError {
    fn from(error: SdkError<DeleteObjectError>) -> Self {
        Self::Upstream(error.into())
    }
}

impl From<SdkError<ListObjectsV2Error>> for BucketError {
    fn from(error: SdkError<ListObjectsV2Error>) -> Self {
        Self::Upstream(error.into())
    }
}
