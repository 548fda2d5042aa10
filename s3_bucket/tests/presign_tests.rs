mod common;

use std::time::{Duration, SystemTime};

use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, Utc};
use common::{counted_bucket, TEST_BUCKET};
use pretty_assertions::assert_eq;
use s3_bucket::{BucketError, PresignGetParams, PresignPutParams};

#[tokio::test]
async fn test_presign_get_carries_key_and_expiry() {
    let (bucket, sessions) = counted_bucket();
    let before = Utc::now();

    let presigned = bucket
        .presign_get(Some(PresignGetParams {
            key: Some("reports/q1.csv".into()),
            duration: Some(Duration::from_secs(3600)),
            raw: None,
        }))
        .await
        .unwrap();

    let url = presigned.url();
    assert_eq!(presigned.request.method(), "GET");
    assert!(url.starts_with(&format!(
        "https://{TEST_BUCKET}.s3.us-east-1.amazonaws.com/reports/q1.csv"
    )));
    assert!(url.contains("X-Amz-Expires=3600"));
    assert!(url.contains("X-Amz-Signature="));

    let expected = before + chrono::Duration::seconds(3600);
    assert!((presigned.expires_at - expected).num_seconds().abs() <= 5);
    assert_eq!(sessions.calls(), 1);
}

#[tokio::test]
async fn test_presign_put_carries_key_and_expiry() {
    let (bucket, _) = counted_bucket();

    let presigned = bucket
        .presign_put(Some(PresignPutParams {
            key: Some("uploads/avatar.png".into()),
            duration: Some(Duration::from_secs(900)),
            raw: None,
        }))
        .await
        .unwrap();

    assert_eq!(presigned.request.method(), "PUT");
    assert!(presigned.url().contains("/uploads/avatar.png"));
    assert!(presigned.url().contains("X-Amz-Expires=900"));
}

#[tokio::test]
async fn test_presign_duration_overrides_raw_expiry() {
    let (bucket, _) = counted_bucket();
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    let presigned = bucket
        .presign_get(Some(PresignGetParams {
            key: Some("k1".into()),
            duration: Some(Duration::from_secs(120)),
            raw: Some(
                PresigningConfig::builder()
                    .start_time(start)
                    .expires_in(Duration::from_secs(7)),
            ),
        }))
        .await
        .unwrap();

    assert!(presigned.url().contains("X-Amz-Expires=120"));
    // 1_700_000_000 is 2023-11-14T22:13:20Z
    assert!(presigned.url().contains("X-Amz-Date=20231114T221320Z"));
    assert_eq!(
        presigned.expires_at,
        DateTime::<Utc>::from(start + Duration::from_secs(120))
    );
}

#[tokio::test]
async fn test_presign_rejects_expiry_beyond_sdk_limit() {
    let (bucket, sessions) = counted_bucket();

    let err = bucket
        .presign_put(Some(PresignPutParams {
            key: Some("k1".into()),
            duration: Some(Duration::from_secs(30 * 24 * 60 * 60)),
            raw: None,
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, BucketError::PresignConfig(_)));
    assert_eq!(sessions.calls(), 0);
}
