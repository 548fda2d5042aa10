//! Bucket-level convenience wrapper around the S3 SDK
//!
//! A [`Bucket`] holds a bucket name and region and lazily creates an S3 client
//! the first time an operation needs one. Every operation validates its
//! parameters, fills in the bucket-owned request fields and forwards the call
//! to `aws-sdk-s3`, returning the SDK output unchanged.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Bucket facade
pub mod bucket;

/// Session configuration
pub mod config;

/// Error types
pub mod error;

mod params;

/// Session creation and account-level operations
pub mod session;

pub use bucket::{object_url, Bucket, BucketIdentity, PresignedUrl, UploadedObject};
pub use config::SessionConfig;
pub use error::{BucketError, BucketResult, UpstreamError};
pub use params::{
    CreateBucketParams, DeleteBucketParams, DeleteObjectParams, GetObjectParams,
    ListObjectsParams, PresignGetParams, PresignPutParams, UploadObjectParams,
};
pub use session::{
    list_buckets, new_session, AwsSessionFactory, ListBucketsParams, NewSessionParams,
    SessionFactory,
};
