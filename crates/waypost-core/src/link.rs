use crate::slug::Slug;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque link identifier assigned by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque redirect-rule identifier assigned by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored short link.
///
/// Read-only from the resolver's point of view: it is fetched, evaluated,
/// and navigated to, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub slug: Slug,
    /// Default redirect target when no rule matches.
    pub destination_url: String,
    /// Display title shown on the redirect interstitial, if any.
    pub title: Option<String>,
    pub active: bool,
    /// Once past, the link is treated as inactive even if a cached copy
    /// still carries `active: true`.
    pub expires_at: Option<Timestamp>,
}

impl Link {
    /// Whether the link has passed its expiry, if one is set.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Timestamp::now() >= expires_at)
    }

    /// Active and not expired. Cached copies can hold a stale `active`
    /// flag, so callers re-check liveness after every cache read.
    pub fn is_live(&self) -> bool {
        self.active && !self.is_expired()
    }
}

/// The kind of condition a [`RedirectRule`] evaluates.
///
/// Closed enum so that adding a condition kind is a compile-time
/// exhaustiveness concern in the evaluator rather than a silently
/// falling-through string comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    TimeOfDay,
    DayOfWeek,
    DeviceType,
    Language,
    Referrer,
    Always,
    /// Condition kinds this core does not recognize. They never match.
    #[serde(other)]
    Unknown,
}

/// A conditional redirect override owned by a link.
///
/// Rules are created and edited out-of-band and are read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub id: RuleId,
    pub link_id: LinkId,
    pub condition_type: ConditionType,
    /// Semantics depend on `condition_type`; see the evaluator.
    pub condition_value: String,
    /// Target if the condition matches.
    pub redirect_url: String,
    /// Lower values are evaluated first and short-circuit later rules.
    pub priority: i32,
    pub active: bool,
}

/// A link and its rules, fetched and cached as one atomic unit so a cache
/// read can never observe the link without its rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectBundle {
    pub link: Link,
    pub rules: Vec<RedirectRule>,
}
