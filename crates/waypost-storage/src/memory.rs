use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use waypost_core::repository::Result;
use waypost_core::{
    ClickEvent, ClickSink, Link, LinkRepository, RedirectBundle, RedirectRule, Slug,
};

/// In-memory link store implementing both persistence traits.
///
/// Backs the resolver integration tests and self-contained embeddings.
/// Reads mirror the backend's joined query: only active links come back,
/// with their active rules already sorted by ascending priority.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: DashMap<String, (Link, Vec<RedirectRule>)>,
    clicks: Mutex<Vec<ClickEvent>>,
}

impl InMemoryLinkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a link together with its rules.
    pub fn insert(&self, link: Link, rules: Vec<RedirectRule>) {
        self.links
            .insert(link.slug.as_str().to_owned(), (link, rules));
    }

    /// Removes a link and its rules. Returns `true` if it existed.
    pub fn delete(&self, slug: &Slug) -> bool {
        self.links.remove(slug.as_str()).is_some()
    }

    /// Recorded click events, oldest first.
    pub fn clicks(&self) -> Vec<ClickEvent> {
        self.clicks.lock().clone()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkStore {
    async fn find_active(&self, slug: &Slug) -> Result<Option<RedirectBundle>> {
        let Some(entry) = self.links.get(slug.as_str()) else {
            return Ok(None);
        };

        let (link, rules) = entry.value();
        if !link.active {
            return Ok(None);
        }

        let mut rules: Vec<RedirectRule> =
            rules.iter().filter(|rule| rule.active).cloned().collect();
        rules.sort_by_key(|rule| rule.priority);

        Ok(Some(RedirectBundle {
            link: link.clone(),
            rules,
        }))
    }
}

#[async_trait]
impl ClickSink for InMemoryLinkStore {
    async fn record(&self, event: ClickEvent) -> Result<()> {
        self.clicks.lock().push(event);
        Ok(())
    }
}
