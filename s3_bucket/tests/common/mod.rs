#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use aws_smithy_runtime::client::http::test_util::{capture_request, CaptureRequestReceiver};
use s3_bucket::{Bucket, BucketError, BucketResult, SessionFactory};

pub const TEST_REGION: &str = "us-east-1";
pub const TEST_BUCKET: &str = "test-bucket";

/// Test configuration for LocalStack
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

fn client_config(region: &str) -> aws_sdk_s3::config::Builder {
    aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .credentials_provider(Credentials::from_keys("test", "test", None))
}

/// Client with hardcoded credentials; good for presigning, never sends requests in tests
pub fn static_client() -> S3Client {
    S3Client::from_conf(client_config(TEST_REGION).build())
}

/// Client whose HTTP layer records the first request and answers with an empty 200
pub fn capturing_client(region: &str) -> (S3Client, CaptureRequestReceiver) {
    let (http_client, receiver) = capture_request(None);
    let client = S3Client::from_conf(client_config(region).http_client(http_client).build());
    (client, receiver)
}

/// Session factory that hands out a fixed client and counts how often it is asked
pub struct CountingSessionFactory {
    client: S3Client,
    delay: Duration,
    calls: AtomicUsize,
    regions: Mutex<Vec<String>>,
}

impl CountingSessionFactory {
    pub fn new(client: S3Client) -> Arc<Self> {
        Self::with_delay(client, Duration::ZERO)
    }

    /// Delays session creation to widen the window for concurrent callers
    pub fn with_delay(client: S3Client, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            client,
            delay,
            calls: AtomicUsize::new(0),
            regions: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionFactory for CountingSessionFactory {
    async fn create_session(&self, region: &str) -> BucketResult<S3Client> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.regions.lock().unwrap().push(region.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(self.client.clone())
    }
}

/// Session factory that always fails, counting attempts
#[derive(Default)]
pub struct FailingSessionFactory {
    calls: AtomicUsize,
}

impl FailingSessionFactory {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionFactory for FailingSessionFactory {
    async fn create_session(&self, _region: &str) -> BucketResult<S3Client> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BucketError::ConfigError("no credentials available".to_string()))
    }
}

/// Session factory for LocalStack with hardcoded credentials for CI
pub struct LocalStackSessionFactory;

#[async_trait]
impl SessionFactory for LocalStackSessionFactory {
    async fn create_session(&self, region: &str) -> BucketResult<S3Client> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(LOCALSTACK_ENDPOINT)
            .region(Region::new(region.to_string()))
            .credentials_provider(Credentials::from_keys("test", "test", None))
            .load()
            .await;

        // Override "force path style" to true for compatibility with LocalStack
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Ok(S3Client::from_conf(s3_config))
    }
}

/// Bucket wired to a counting factory over a presign-capable client
pub fn counted_bucket() -> (Bucket, Arc<CountingSessionFactory>) {
    let sessions = CountingSessionFactory::new(static_client());
    let bucket = Bucket::new(TEST_BUCKET, TEST_REGION).with_session_factory(sessions.clone());
    (bucket, sessions)
}

/// Bucket whose session records the first outgoing request
pub fn capturing_bucket(region: &str) -> (Bucket, CaptureRequestReceiver) {
    let (client, receiver) = capturing_client(region);
    let bucket =
        Bucket::new(TEST_BUCKET, region).with_session_factory(CountingSessionFactory::new(client));
    (bucket, receiver)
}
