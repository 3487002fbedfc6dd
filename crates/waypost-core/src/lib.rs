//! Core types and traits for the Waypost redirect engine.
//!
//! This crate provides the domain model (links, redirect rules, click
//! events) and the boundary traits the resolver consumes: the persistence
//! collaborator ([`LinkRepository`], [`ClickSink`]) and the host
//! [`Environment`] the runtime context is captured from.

pub mod click;
pub mod device;
pub mod environment;
pub mod error;
pub mod link;
pub mod repository;
pub mod slug;

pub use click::{ClickEvent, UtmParams};
pub use device::DeviceType;
pub use environment::{Environment, StaticEnvironment};
pub use error::{CoreError, RepositoryError};
pub use link::{ConditionType, Link, LinkId, RedirectBundle, RedirectRule, RuleId};
pub use repository::{ClickSink, LinkRepository};
pub use slug::Slug;
