//! Cache-first resolution of short-link slugs to redirect targets.
//!
//! [`RedirectResolver`] ties the pieces together: it looks a slug up in the
//! redirect cache, falls back to a [`LinkRepository`](waypost_core::LinkRepository),
//! re-checks liveness, lets the rule evaluator pick an override, and records
//! a click off the critical path.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use waypost_cache::{MemoryMedium, RedirectCache};
//! use waypost_core::{ClickSink, StaticEnvironment};
//! use waypost_resolver::RedirectResolver;
//! use waypost_storage::InMemoryLinkStore;
//!
//! # async fn demo() {
//! let store = Arc::new(InMemoryLinkStore::new());
//! let resolver = RedirectResolver::new(
//!     Arc::clone(&store),
//!     RedirectCache::new(MemoryMedium::new()),
//!     store as Arc<dyn ClickSink>,
//!     Arc::new(StaticEnvironment::builder().build()),
//! );
//!
//! let state = resolver.resolve(Some("promo")).await;
//! if let Some(url) = state.resolved_url() {
//!     println!("redirecting to {url}");
//! }
//! # }
//! ```

pub mod resolver;
pub mod state;
pub mod tracker;

pub use resolver::{RedirectResolver, MSG_FETCH_FAILED, MSG_NOT_FOUND, MSG_NO_SLUG};
pub use state::{Resolution, ResolveState};
pub use tracker::ClickTracker;
