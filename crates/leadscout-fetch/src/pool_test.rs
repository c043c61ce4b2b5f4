use super::*;
use leadscout_core::{ProxyScheme, ProxySpec};

fn spec(host: &str, port: u16) -> ProxySpec {
    ProxySpec {
        host: host.to_owned(),
        port,
        scheme: ProxyScheme::Http,
        username: None,
        password: None,
        label: None,
    }
}

async fn pool_with(hosts: &[(&str, u16)]) -> (ProxyPool, Vec<Uuid>) {
    let pool = ProxyPool::new(3);
    let mut ids = Vec::new();
    for (host, port) in hosts {
        ids.push(pool.add(spec(host, *port)).await.unwrap());
    }
    (pool, ids)
}

#[tokio::test]
async fn empty_pool_selects_direct() {
    let pool = ProxyPool::new(3);
    assert!(matches!(pool.select().await, Egress::Direct));
}

#[tokio::test]
async fn selection_prefers_higher_success_rate_at_equal_recency() {
    let (pool, ids) = pool_with(&[("weak", 8080), ("strong", 8081)]).await;

    // weak: 1/2 successes, strong: 2/2. Neither has been selected yet, so
    // recency penalties are equal (zero).
    pool.report(ids[0], true, Some(100)).await;
    pool.report(ids[0], false, None).await;
    pool.report(ids[1], true, Some(100)).await;
    pool.report(ids[1], true, Some(100)).await;

    match pool.select().await {
        Egress::Proxy { id, .. } => assert_eq!(id, ids[1], "higher success rate must win"),
        Egress::Direct => panic!("expected a proxy"),
    }
}

#[tokio::test]
async fn selection_spreads_load_across_equal_proxies() {
    let (pool, ids) = pool_with(&[("a", 8080), ("b", 8081)]).await;

    let first = match pool.select().await {
        Egress::Proxy { id, .. } => id,
        Egress::Direct => panic!("expected a proxy"),
    };
    let second = match pool.select().await {
        Egress::Proxy { id, .. } => id,
        Egress::Direct => panic!("expected a proxy"),
    };
    assert_ne!(first, second, "the just-used proxy should be penalized");
    assert!(ids.contains(&first) && ids.contains(&second));
}

#[tokio::test]
async fn three_consecutive_failures_block_a_proxy() {
    let (pool, ids) = pool_with(&[("only", 8080)]).await;

    pool.report(ids[0], false, None).await;
    pool.report(ids[0], false, None).await;
    let listed = pool.list().await;
    assert_eq!(
        listed[0].status,
        ProxyStatus::Active,
        "two failures must not block"
    );

    pool.report(ids[0], false, None).await;
    let listed = pool.list().await;
    assert_eq!(listed[0].status, ProxyStatus::Blocked);

    // With the only proxy blocked, selection falls back to direct.
    assert!(matches!(pool.select().await, Egress::Direct));
}

#[tokio::test]
async fn success_resets_consecutive_failure_streak() {
    let (pool, ids) = pool_with(&[("only", 8080)]).await;

    pool.report(ids[0], false, None).await;
    pool.report(ids[0], false, None).await;
    pool.report(ids[0], true, Some(50)).await;
    pool.report(ids[0], false, None).await;
    pool.report(ids[0], false, None).await;

    let listed = pool.list().await;
    assert_eq!(
        listed[0].status,
        ProxyStatus::Active,
        "streak should have been reset by the intervening success"
    );
}

#[tokio::test]
async fn reset_blocked_reactivates_and_clears_failures() {
    let (pool, ids) = pool_with(&[("only", 8080)]).await;
    for _ in 0..3 {
        pool.report(ids[0], false, None).await;
    }
    assert_eq!(pool.list().await[0].status, ProxyStatus::Blocked);

    let reset = pool.reset_blocked().await;
    assert_eq!(reset, 1);

    let listed = pool.list().await;
    assert_eq!(listed[0].status, ProxyStatus::Active);
    assert_eq!(listed[0].failure_count, 0);
}

#[tokio::test]
async fn running_average_latency_update() {
    let (pool, ids) = pool_with(&[("only", 8080)]).await;

    pool.report(ids[0], true, Some(100)).await;
    pool.report(ids[0], true, Some(200)).await;
    pool.report(ids[0], true, Some(300)).await;

    let listed = pool.list().await;
    assert!(
        (listed[0].avg_response_time_ms - 200.0).abs() < f64::EPSILON,
        "expected running average of 200, got {}",
        listed[0].avg_response_time_ms
    );
}

#[tokio::test]
async fn failures_do_not_affect_average_latency() {
    let (pool, ids) = pool_with(&[("only", 8080)]).await;

    pool.report(ids[0], true, Some(100)).await;
    pool.report(ids[0], false, None).await;

    let listed = pool.list().await;
    assert!((listed[0].avg_response_time_ms - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn add_rejects_duplicate_endpoint() {
    let (pool, _ids) = pool_with(&[("dup", 8080)]).await;
    let err = pool.add(spec("dup", 8080)).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidProxy { .. }));
}

#[tokio::test]
async fn remove_unknown_id_returns_false() {
    let (pool, ids) = pool_with(&[("a", 8080)]).await;
    assert!(!pool.remove(Uuid::new_v4()).await);
    assert!(pool.remove(ids[0]).await);
    assert!(pool.list().await.is_empty());
}

#[tokio::test]
async fn health_counts_statuses_and_ranks_top_performers() {
    let (pool, ids) = pool_with(&[("good", 8080), ("bad", 8081), ("broken", 8082)]).await;

    pool.report(ids[0], true, Some(120)).await;
    pool.report(ids[0], true, Some(80)).await;
    for _ in 0..3 {
        pool.report(ids[1], false, None).await;
    }
    pool.mark_error(ids[2]).await;

    let health = pool.health().await;
    assert_eq!(health.total, 3);
    assert_eq!(health.active, 1);
    assert_eq!(health.blocked, 1);
    assert_eq!(health.error, 1);
    assert_eq!(health.top_performers.len(), 1);
    assert_eq!(health.top_performers[0].id, ids[0]);
    assert!((health.avg_response_time_ms - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn report_for_removed_proxy_is_ignored() {
    let (pool, ids) = pool_with(&[("a", 8080)]).await;
    pool.remove(ids[0]).await;
    // Must not panic or resurrect the proxy.
    pool.report(ids[0], true, Some(10)).await;
    assert!(pool.list().await.is_empty());
}
