//! Connection behaviour that needs no running database.

use std::time::Duration;

use ow_load::{LoadError, PgConfig, connect};

#[tokio::test]
async fn unreachable_server_fails_after_all_attempts() {
    let mut config = PgConfig::new("127.0.0.1", 1, "warehouse", "etl", "secret");
    config.connect_retries = 1;
    config.retry_backoff = Duration::from_millis(10);
    config.acquire_timeout = Duration::from_millis(500);

    let err = connect(&config).await.unwrap_err();
    match err {
        LoadError::Connect {
            target, attempts, ..
        } => {
            assert_eq!(target, "127.0.0.1:1/warehouse");
            assert_eq!(attempts, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn invalid_schema_rejected_before_connecting() {
    let mut config = PgConfig::new("127.0.0.1", 1, "warehouse", "etl", "secret");
    config.schema = "bad name".to_string();

    let err = connect(&config).await.unwrap_err();
    assert!(matches!(err, LoadError::InvalidIdentifier { name } if name == "bad name"));
}
