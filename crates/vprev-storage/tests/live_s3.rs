//! Round-trip against a live S3-compatible endpoint.
//!
//! Requires AWS credentials (or `S3_ENDPOINT_URL` pointing at MinIO) and a
//! writable bucket in `TEST_BUCKET`.

use vprev_storage::{ObjectStore, S3Store};

#[tokio::test]
#[ignore = "requires live S3 credentials and TEST_BUCKET"]
async fn fetch_publish_round_trip() {
    let bucket = std::env::var("TEST_BUCKET").expect("TEST_BUCKET not set");
    let store = S3Store::from_env().await.expect("store config");

    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("round-trip.mp4");
    tokio::fs::write(&source, b"not really a video").await.unwrap();

    store
        .publish(&source, &bucket, "tests/round-trip.mp4")
        .await
        .expect("publish");

    let fetched = dir.path().join("fetched.mp4");
    store
        .fetch(&bucket, "tests/round-trip.mp4", &fetched)
        .await
        .expect("fetch");

    let bytes = tokio::fs::read(&fetched).await.unwrap();
    assert_eq!(bytes, b"not really a video");
}
