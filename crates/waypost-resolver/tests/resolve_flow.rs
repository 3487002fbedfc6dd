use async_trait::async_trait;
use jiff::civil::date;
use jiff::{SignedDuration, Timestamp};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use waypost_cache::{MemoryMedium, RedirectCache};
use waypost_core::repository::Result;
use waypost_core::{
    ClickEvent, ClickSink, ConditionType, Link, LinkId, LinkRepository, RedirectBundle,
    RedirectRule, RepositoryError, RuleId, Slug, StaticEnvironment,
};
use waypost_resolver::{
    RedirectResolver, ResolveState, MSG_FETCH_FAILED, MSG_NOT_FOUND, MSG_NO_SLUG,
};
use waypost_storage::InMemoryLinkStore;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) \
    AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";

fn link(slug: &str) -> Link {
    Link {
        id: LinkId::new(format!("id-{}", slug)),
        slug: Slug::new_unchecked(slug),
        destination_url: "https://default.example".to_string(),
        title: Some("Promo".to_string()),
        active: true,
        expires_at: None,
    }
}

fn rule(id: &str, priority: i32, condition_type: ConditionType, value: &str) -> RedirectRule {
    RedirectRule {
        id: RuleId::new(id),
        link_id: LinkId::new("id-promo"),
        condition_type,
        condition_value: value.to_string(),
        redirect_url: format!("https://{}.example", id),
        priority,
        active: true,
    }
}

/// Environment pinned to 2025-06-11 (a Wednesday) at the given hour.
fn env_at(hour: i8, user_agent: Option<&str>) -> StaticEnvironment {
    let now = date(2025, 6, 11)
        .at(hour, 0, 0, 0)
        .in_tz("UTC")
        .unwrap();
    let builder = StaticEnvironment::builder().now(now);
    match user_agent {
        Some(ua) => builder.user_agent(ua).build(),
        None => builder.build(),
    }
}

fn resolver(
    store: Arc<InMemoryLinkStore>,
    env: StaticEnvironment,
) -> RedirectResolver<InMemoryLinkStore, MemoryMedium, StaticEnvironment> {
    RedirectResolver::new(
        Arc::clone(&store),
        RedirectCache::new(MemoryMedium::new()),
        store as Arc<dyn ClickSink>,
        Arc::new(env),
    )
}

/// Clicks are recorded on a spawned task; poll until they land.
async fn wait_for_clicks(store: &InMemoryLinkStore, count: usize) -> Vec<ClickEvent> {
    for _ in 0..100 {
        let clicks = store.clicks();
        if clicks.len() >= count {
            return clicks;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {} clicks, got {}", count, store.clicks().len());
}

#[tokio::test]
async fn time_rule_redirects_inside_its_window() {
    let store = Arc::new(InMemoryLinkStore::new());
    store.insert(
        link("promo"),
        vec![rule("biz", 0, ConditionType::TimeOfDay, "9-17")],
    );

    let in_window = resolver(Arc::clone(&store), env_at(10, None));
    let state = in_window.resolve(Some("promo")).await;
    assert_eq!(state.resolved_url(), Some("https://biz.example"));

    let after_hours = resolver(Arc::clone(&store), env_at(20, None));
    let state = after_hours.resolve(Some("promo")).await;
    assert_eq!(state.resolved_url(), Some("https://default.example"));
}

#[tokio::test]
async fn lower_priority_always_rule_beats_matching_device_rule() {
    let store = Arc::new(InMemoryLinkStore::new());
    store.insert(
        link("promo"),
        vec![
            rule("mobile", 1, ConditionType::DeviceType, "mobile"),
            rule("always", 0, ConditionType::Always, ""),
        ],
    );

    let resolver = resolver(Arc::clone(&store), env_at(10, Some(IPHONE)));
    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.resolved_url(), Some("https://always.example"));
}

#[tokio::test]
async fn inactive_link_is_not_found_and_not_tracked() {
    let store = Arc::new(InMemoryLinkStore::new());
    let mut inactive = link("promo");
    inactive.active = false;
    store.insert(inactive, vec![]);

    let resolver = resolver(Arc::clone(&store), env_at(10, None));
    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.error_message(), Some(MSG_NOT_FOUND));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(store.clicks().is_empty());
}

#[tokio::test]
async fn expired_link_is_not_found_even_while_flagged_active() {
    let store = Arc::new(InMemoryLinkStore::new());
    let mut expired = link("promo");
    expired.expires_at = Some(Timestamp::now() - SignedDuration::from_secs(60));
    store.insert(expired, vec![]);

    let resolver = resolver(Arc::clone(&store), env_at(10, None));
    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.error_message(), Some(MSG_NOT_FOUND));
}

#[tokio::test]
async fn missing_slug_settles_immediately() {
    let store = Arc::new(InMemoryLinkStore::new());
    let resolver = resolver(Arc::clone(&store), env_at(10, None));

    for slug in [None, Some("")] {
        let state = resolver.resolve(slug).await;
        assert_eq!(state.error_message(), Some(MSG_NO_SLUG));
    }
    assert!(store.clicks().is_empty());
}

struct CountingRepo {
    inner: InMemoryLinkStore,
    fetches: AtomicUsize,
}

#[async_trait]
impl LinkRepository for CountingRepo {
    async fn find_active(&self, slug: &Slug) -> Result<Option<RedirectBundle>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.find_active(slug).await
    }
}

#[tokio::test]
async fn cache_hit_skips_the_repository() {
    let inner = InMemoryLinkStore::new();
    inner.insert(link("promo"), vec![]);
    let repo = Arc::new(CountingRepo {
        inner,
        fetches: AtomicUsize::new(0),
    });

    let cache = RedirectCache::new(MemoryMedium::new());
    let slug = Slug::new_unchecked("promo");
    cache.set(
        &slug,
        &RedirectBundle {
            link: link("promo"),
            rules: vec![],
        },
    );

    let sink = Arc::new(InMemoryLinkStore::new());
    let resolver = RedirectResolver::new(
        Arc::clone(&repo),
        cache,
        sink as Arc<dyn ClickSink>,
        Arc::new(env_at(10, None)),
    );

    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.resolved_url(), Some("https://default.example"));
    assert_eq!(repo.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn repository_miss_is_not_cached() {
    let inner = InMemoryLinkStore::new();
    let repo = Arc::new(CountingRepo {
        inner,
        fetches: AtomicUsize::new(0),
    });
    let sink = Arc::new(InMemoryLinkStore::new());
    let resolver = RedirectResolver::new(
        Arc::clone(&repo),
        RedirectCache::new(MemoryMedium::new()),
        sink as Arc<dyn ClickSink>,
        Arc::new(env_at(10, None)),
    );

    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.error_message(), Some(MSG_NOT_FOUND));

    // The link appears; a fresh attempt must go back to the repository
    // rather than replay a cached miss.
    repo.inner.insert(link("promo"), vec![]);
    resolver.reset();
    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.resolved_url(), Some("https://default.example"));
    assert_eq!(repo.fetches.load(Ordering::SeqCst), 2);
}

struct FailingRepo;

#[async_trait]
impl LinkRepository for FailingRepo {
    async fn find_active(&self, _slug: &Slug) -> Result<Option<RedirectBundle>> {
        Err(RepositoryError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn repository_error_fails_distinctly_from_not_found() {
    let sink = Arc::new(InMemoryLinkStore::new());
    let resolver = RedirectResolver::new(
        Arc::new(FailingRepo),
        RedirectCache::new(MemoryMedium::new()),
        Arc::clone(&sink) as Arc<dyn ClickSink>,
        Arc::new(env_at(10, None)),
    );

    let state = resolver.resolve(Some("promo")).await;
    assert!(matches!(state, ResolveState::Failed { .. }));
    assert_eq!(state.error_message(), Some(MSG_FETCH_FAILED));
    assert!(sink.clicks().is_empty());
}

#[tokio::test]
async fn click_is_recorded_once_per_settled_slug() {
    let store = Arc::new(InMemoryLinkStore::new());
    store.insert(link("promo"), vec![]);

    let resolver = resolver(Arc::clone(&store), env_at(10, Some(IPHONE)));
    resolver.resolve(Some("promo")).await;
    let clicks = wait_for_clicks(&store, 1).await;
    assert_eq!(clicks[0].link_id, LinkId::new("id-promo"));
    assert_eq!(clicks[0].browser.as_deref(), Some("Safari"));

    // Settled state is returned as-is; no second click.
    let state = resolver.resolve(Some("promo")).await;
    assert!(state.is_terminal());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(store.clicks().len(), 1);
}

struct FailingSink;

#[async_trait]
impl ClickSink for FailingSink {
    async fn record(&self, _event: ClickEvent) -> Result<()> {
        Err(RepositoryError::Operation("insert failed".to_string()))
    }
}

#[tokio::test]
async fn tracking_failure_does_not_disturb_the_resolved_state() {
    let store = Arc::new(InMemoryLinkStore::new());
    store.insert(link("promo"), vec![]);

    let resolver = RedirectResolver::new(
        Arc::clone(&store),
        RedirectCache::new(MemoryMedium::new()),
        Arc::new(FailingSink) as Arc<dyn ClickSink>,
        Arc::new(env_at(10, None)),
    );

    let state = resolver.resolve(Some("promo")).await;
    assert_eq!(state.resolved_url(), Some("https://default.example"));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(resolver.state(), state);
}

struct GatedRepo {
    inner: InMemoryLinkStore,
    entered: AtomicBool,
    gate: Notify,
}

#[async_trait]
impl LinkRepository for GatedRepo {
    async fn find_active(&self, slug: &Slug) -> Result<Option<RedirectBundle>> {
        if slug.as_str() == "slow" {
            self.entered.store(true, Ordering::SeqCst);
            self.gate.notified().await;
        }
        self.inner.find_active(slug).await
    }
}

#[tokio::test]
async fn superseded_attempt_does_not_overwrite_the_newer_result() {
    let inner = InMemoryLinkStore::new();
    inner.insert(link("slow"), vec![]);
    inner.insert(link("fast"), vec![]);
    let repo = Arc::new(GatedRepo {
        inner,
        entered: AtomicBool::new(false),
        gate: Notify::new(),
    });

    let sink = Arc::new(InMemoryLinkStore::new());
    let resolver = Arc::new(RedirectResolver::new(
        Arc::clone(&repo),
        RedirectCache::new(MemoryMedium::new()),
        Arc::clone(&sink) as Arc<dyn ClickSink>,
        Arc::new(env_at(10, None)),
    ));

    let slow = {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move { resolver.resolve(Some("slow")).await })
    };
    while !repo.entered.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    // A newer navigation arrives while the first lookup is stuck.
    let state = resolver.resolve(Some("fast")).await;
    assert_eq!(state.resolved_url(), Some("https://default.example"));

    repo.gate.notify_one();
    slow.await.unwrap();

    // The stale outcome is discarded: state and clicks belong to "fast".
    assert_eq!(resolver.state(), state);
    let clicks = wait_for_clicks(&sink, 1).await;
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].link_id, LinkId::new("id-fast"));
}

#[tokio::test]
async fn utm_parameters_flow_into_the_recorded_click() {
    let store = Arc::new(InMemoryLinkStore::new());
    store.insert(link("promo"), vec![]);

    let now = date(2025, 6, 11).at(10, 0, 0, 0).in_tz("UTC").unwrap();
    let env = StaticEnvironment::builder()
        .now(now)
        .page_url("https://way.example/r/promo?utm_source=newsletter&utm_campaign=june")
        .build();
    let resolver = RedirectResolver::new(
        Arc::clone(&store),
        RedirectCache::new(MemoryMedium::new()),
        Arc::clone(&store) as Arc<dyn ClickSink>,
        Arc::new(env),
    );

    resolver.resolve(Some("promo")).await;
    let clicks = wait_for_clicks(&store, 1).await;
    assert_eq!(clicks[0].utm.source.as_deref(), Some("newsletter"));
    assert_eq!(clicks[0].utm.campaign.as_deref(), Some("june"));
    assert!(clicks[0].utm.medium.is_none());
}
