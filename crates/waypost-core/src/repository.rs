use crate::click::ClickEvent;
use crate::error::RepositoryError;
use crate::link::RedirectBundle;
use crate::slug::Slug;
use async_trait::async_trait;

/// Type alias for persistence results.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Read-only view of the persistence collaborator used during resolution.
///
/// Implementations back onto whatever store holds links and rules (a hosted
/// database, an HTTP API, or an in-memory store for tests and embedding).
#[async_trait]
pub trait LinkRepository: Send + Sync + 'static {
    /// Fetches the active link for `slug` together with its active rules.
    ///
    /// Returns `Ok(None)` when no link exists for the slug or the stored
    /// link is inactive. Rules may come back in any order; the evaluator
    /// sorts by priority either way. No transactional guarantee is required
    /// across the link and its rules, but implementations may serve both
    /// from a single joined query.
    async fn find_active(&self, slug: &Slug) -> Result<Option<RedirectBundle>>;
}

/// Write-only sink for click events.
#[async_trait]
pub trait ClickSink: Send + Sync + 'static {
    /// Records a single visit. The event timestamp and click-count
    /// aggregation are the persistence layer's responsibility.
    async fn record(&self, event: ClickEvent) -> Result<()>;
}
