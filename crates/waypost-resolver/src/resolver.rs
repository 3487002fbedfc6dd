use crate::state::{Resolution, ResolveState};
use crate::tracker::ClickTracker;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use waypost_cache::{RedirectCache, StorageMedium};
use waypost_core::repository;
use waypost_core::{
    ClickSink, Environment, LinkRepository, RedirectBundle, Slug,
};
use waypost_rules::{first_match, RuntimeContext};

/// Shown when resolution is attempted without a slug.
pub const MSG_NO_SLUG: &str = "No slug provided";
/// Shown when the slug is unknown, inactive, or expired.
pub const MSG_NOT_FOUND: &str = "Link not found or inactive";
/// Shown when the lookup itself failed.
pub const MSG_FETCH_FAILED: &str = "An error occurred during redirect";

#[derive(Debug, Default)]
struct Current {
    slug: Option<Slug>,
    state: ResolveState,
}

/// Cache-first redirect resolver.
///
/// One resolver handles one visit at a time: [`resolve`](Self::resolve)
/// moves through `Loading` into a terminal state, and re-resolving the
/// slug that already settled returns the settled state without another
/// lookup or click record. Resolving a different slug starts over, and a
/// newer attempt invalidates the commit of any older in-flight one.
pub struct RedirectResolver<R, M, E> {
    repository: Arc<R>,
    cache: RedirectCache<M>,
    tracker: ClickTracker,
    env: Arc<E>,
    current: Mutex<Current>,
    // Bumped per attempt; a finished lookup only commits when still newest.
    epoch: AtomicU64,
}

impl<R, M, E> RedirectResolver<R, M, E>
where
    R: LinkRepository,
    M: StorageMedium,
    E: Environment,
{
    pub fn new(
        repository: Arc<R>,
        cache: RedirectCache<M>,
        sink: Arc<dyn ClickSink>,
        env: Arc<E>,
    ) -> Self {
        Self {
            repository,
            cache,
            tracker: ClickTracker::new(sink),
            env,
            current: Mutex::new(Current::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ResolveState {
        self.current.lock().state.clone()
    }

    /// Resolves `slug` to its redirect target and returns the terminal
    /// state. A click is recorded (best-effort, off the resolve path) only
    /// when this call itself commits a `Resolved` outcome.
    pub async fn resolve(&self, slug: Option<&str>) -> ResolveState {
        let Some(raw) = slug.filter(|raw| !raw.is_empty()) else {
            return self.settle_without_lookup(MSG_NO_SLUG);
        };

        let Ok(slug) = Slug::new(raw) else {
            trace!(slug = raw, "rejecting malformed slug");
            return self.settle_without_lookup(MSG_NOT_FOUND);
        };

        let epoch = {
            let mut current = self.current.lock();
            if current.slug.as_ref() == Some(&slug) && current.state.is_terminal() {
                // Already settled for this slug; do not fetch or track again.
                return current.state.clone();
            }
            current.slug = Some(slug.clone());
            current.state = ResolveState::Loading;
            self.epoch.fetch_add(1, Ordering::SeqCst) + 1
        };

        let outcome = self.resolve_inner(&slug).await;

        let committed = {
            let mut current = self.current.lock();
            let still_newest = self.epoch.load(Ordering::SeqCst) == epoch
                && current.slug.as_ref() == Some(&slug)
                && current.state == ResolveState::Loading;
            if still_newest {
                current.state = outcome.clone();
            }
            still_newest
        };

        if committed {
            if let ResolveState::Resolved(resolution) = &outcome {
                self.tracker
                    .track(resolution.link_id.clone(), self.env.as_ref());
            }
        } else {
            trace!(slug = %slug, "discarding stale resolution");
        }

        outcome
    }

    /// Clears the slug binding and returns to `Idle`, so the next resolve
    /// runs fresh even for the slug that last settled.
    pub fn reset(&self) {
        let mut current = self.current.lock();
        current.slug = None;
        current.state = ResolveState::Idle;
    }

    async fn resolve_inner(&self, slug: &Slug) -> ResolveState {
        let bundle = match self.lookup(slug).await {
            Ok(Some(bundle)) => bundle,
            Ok(None) => {
                debug!(slug = %slug, "no active link for slug");
                return ResolveState::NotFound {
                    message: MSG_NOT_FOUND.to_string(),
                };
            }
            Err(err) => {
                warn!(slug = %slug, error = %err, "redirect lookup failed");
                return ResolveState::Failed {
                    message: MSG_FETCH_FAILED.to_string(),
                };
            }
        };

        // A cached bundle may carry a stale active flag or a passed expiry.
        if !bundle.link.is_live() {
            debug!(slug = %slug, "link is no longer live");
            return ResolveState::NotFound {
                message: MSG_NOT_FOUND.to_string(),
            };
        }

        let ctx = RuntimeContext::capture(self.env.as_ref());
        let target_url = first_match(&bundle.rules, &ctx)
            .filter(|rule| !rule.redirect_url.is_empty())
            .map(|rule| rule.redirect_url.clone())
            .unwrap_or_else(|| bundle.link.destination_url.clone());

        ResolveState::Resolved(Resolution {
            link_id: bundle.link.id,
            target_url,
            title: bundle.link.title,
        })
    }

    /// Cache-first fetch. Hits are trusted for their TTL; misses go to the
    /// repository, and only found bundles are cached so an unknown slug is
    /// re-checked on every visit.
    async fn lookup(&self, slug: &Slug) -> repository::Result<Option<RedirectBundle>> {
        if let Some(bundle) = self.cache.get(slug) {
            debug!(slug = %slug, "redirect cache hit");
            return Ok(Some(bundle));
        }

        trace!(slug = %slug, "redirect cache miss, querying repository");
        let fetched = self.repository.find_active(slug).await?;
        if let Some(bundle) = &fetched {
            self.cache.set(slug, bundle);
        }
        Ok(fetched)
    }

    fn settle_without_lookup(&self, message: &str) -> ResolveState {
        let state = ResolveState::NotFound {
            message: message.to_string(),
        };
        let mut current = self.current.lock();
        current.slug = None;
        current.state = state.clone();
        state
    }
}
