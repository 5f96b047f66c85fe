#![cfg(feature = "test-utils")]
// tests/fetch_it.rs

use locking_cache::errors::CacheError;
use locking_cache::infrastructure::redis::utils::RedisTestContext;
use locking_cache::FetchOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn fast_options() -> FetchOptions {
    FetchOptions::default()
        .with_lock_wait(Duration::from_millis(10))
        .with_cache_wait(Duration::from_millis(800))
}

#[tokio::test]
async fn test_missing_key_returns_uncached_value() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = ctx.cache();

    let result = cache
        .fetch("cache key", fast_options(), || async {
            Ok("cached".to_string())
        })
        .await
        .unwrap();

    assert_eq!(result.as_deref(), Some("cached"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_missing_key_permits_a_single_concurrent_update() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = Arc::new(ctx.cache());
    let uncached_calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..10 {
        let cache = cache.clone();
        let uncached_calls = uncached_calls.clone();
        handles.push(tokio::spawn(async move {
            cache
                .fetch("cache key", fast_options(), || async move {
                    // Simulation d'un appel coûteux
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    uncached_calls.fetch_add(1, Ordering::SeqCst);
                    Ok("cached".to_string())
                })
                .await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.as_deref(), Some("cached"));
    }
    assert_eq!(uncached_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_expired_key_makes_a_single_call_to_the_origin() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = Arc::new(ctx.cache());

    let opts = fast_options().with_expires_in(Duration::from_millis(100));
    cache
        .fetch("cache key", opts, || async { Ok("cached".to_string()) })
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache
                .fetch("cache key", fast_options(), || async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Ok("new cached".to_string())
                })
                .await
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap().unwrap());
    }
    results.sort();

    assert_eq!(
        results,
        vec!["cached", "cached", "cached", "cached", "new cached"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_expired_key_serves_the_cached_value_on_error() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = Arc::new(ctx.cache());

    let opts = fast_options().with_expires_in(Duration::from_millis(100));
    cache
        .fetch("cache key", opts, || async { Ok("cached".to_string()) })
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let mut handles = Vec::new();
    for _ in 0..5 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache
                .fetch("cache key", fast_options(), || async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Err(CacheError::producer("origin exploded"))
                })
                .await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.as_deref(), Some("cached"));
    }
}

#[tokio::test]
async fn test_live_key_serves_the_cached_value() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = ctx.cache();

    let opts = fast_options().with_expires_in(Duration::from_secs(5));
    cache
        .fetch("cache key", opts, || async { Ok("cached".to_string()) })
        .await
        .unwrap();

    let result = cache
        .fetch("cache key", fast_options(), || async {
            Ok("new cached".to_string())
        })
        .await
        .unwrap();

    assert_eq!(result.as_deref(), Some("cached"));
}

#[tokio::test]
async fn test_missing_key_propagates_producer_errors() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = ctx.cache();

    let result = cache
        .fetch("cache key", fast_options(), || async {
            Err(CacheError::producer("origin exploded"))
        })
        .await;

    assert!(matches!(result, Err(CacheError::Producer(_))));
}

#[tokio::test]
async fn test_flush_all_empties_the_cache() {
    let ctx = RedisTestContext::builder().build().await;
    let cache = ctx.cache();

    cache
        .fetch("cache key", fast_options(), || async {
            Ok("cached".to_string())
        })
        .await
        .unwrap();

    cache.flush_all().await.unwrap();

    // Cache redevenu froid : le producteur est réinvoqué.
    let result = cache
        .fetch("cache key", fast_options(), || async {
            Ok("recomputed".to_string())
        })
        .await
        .unwrap();
    assert_eq!(result.as_deref(), Some("recomputed"));
}
