//! Walks through every bucket operation against the configured S3 endpoint
//!
//! ```sh
//! S3_BUCKET_NAME=my-bucket AWS_REGION=us-east-1 \
//! S3_ENDPOINT_URL=http://localhost:4566 S3_FORCE_PATH_STYLE=true \
//! RUST_LOG=s3_bucket=debug cargo run --example bucket_tour
//! ```

use std::sync::Arc;
use std::time::Duration;

use s3_bucket::{
    AwsSessionFactory, Bucket, DeleteObjectParams, GetObjectParams, ListObjectsParams,
    PresignGetParams, UploadObjectParams,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let name = std::env::var("S3_BUCKET_NAME").unwrap_or_else(|_| "bucket-tour".to_string());
    let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    let bucket = Bucket::new(name, region)
        .with_session_factory(Arc::new(AwsSessionFactory::from_env()?));

    bucket.create(None).await?;

    let uploaded = bucket
        .upload_object(Some(UploadObjectParams {
            file: Some(b"hello from bucket_tour".to_vec()),
            key: Some("tour/hello.txt".into()),
            raw: None,
        }))
        .await?;
    tracing::info!("Uploaded object to {}", uploaded.url);

    let listed = bucket
        .list_objects(Some(ListObjectsParams {
            prefix: Some("tour/".into()),
            limit: Some(10),
            ..Default::default()
        }))
        .await?;
    for object in listed.contents() {
        tracing::info!("Found object: {:?} ({:?} bytes)", object.key(), object.size());
    }

    let fetched = bucket
        .get_object(Some(GetObjectParams {
            key: Some("tour/hello.txt".into()),
            raw: None,
        }))
        .await?;
    let body = fetched.body.collect().await?.into_bytes();
    tracing::info!("Downloaded {} bytes", body.len());

    let presigned = bucket
        .presign_get(Some(PresignGetParams {
            key: Some("tour/hello.txt".into()),
            duration: Some(Duration::from_secs(15 * 60)),
            raw: None,
        }))
        .await?;
    tracing::info!(
        "Presigned GET expires at {}: {}",
        presigned.expires_at,
        presigned.url()
    );

    bucket
        .delete_object(Some(DeleteObjectParams {
            key: Some("tour/hello.txt".into()),
            raw: None,
        }))
        .await?;
    bucket.delete(None).await?;

    Ok(())
}
