use crate::medium::StorageMedium;
use crate::store::TtlCache;
use jiff::SignedDuration;
use waypost_core::{RedirectBundle, Slug};

/// Default lifetime of a cached redirect bundle.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_secs(3600);

/// Typed cache for redirect bundles, one entry per slug.
///
/// A bundle (link plus rules) is stored as a single entry so a hit can
/// never observe the link without its rules. Entries are trusted for their
/// TTL window; liveness of the link itself is re-checked by the resolver
/// after every read.
#[derive(Debug, Clone)]
pub struct RedirectCache<M> {
    store: TtlCache<M>,
    ttl: SignedDuration,
}

impl<M: StorageMedium> RedirectCache<M> {
    /// Creates a redirect cache with the default prefix and TTL.
    pub fn new(medium: M) -> Self {
        Self::with_ttl(medium, DEFAULT_TTL)
    }

    /// Creates a redirect cache with a custom TTL.
    pub fn with_ttl(medium: M, ttl: SignedDuration) -> Self {
        Self {
            store: TtlCache::new(medium),
            ttl,
        }
    }

    /// Returns the cached bundle for `slug`, if present and unexpired.
    pub fn get(&self, slug: &Slug) -> Option<RedirectBundle> {
        self.store.get(&Self::key(slug))
    }

    /// Caches a bundle for `slug` under this cache's TTL.
    pub fn set(&self, slug: &Slug, bundle: &RedirectBundle) {
        self.store.set(&Self::key(slug), bundle, self.ttl);
    }

    /// Drops the cached bundle for `slug`, if any.
    pub fn remove(&self, slug: &Slug) {
        self.store.remove(&Self::key(slug));
    }

    fn key(slug: &Slug) -> String {
        format!("redirect_{}", slug)
    }
}
