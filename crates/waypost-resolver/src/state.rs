use waypost_core::LinkId;

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub link_id: LinkId,
    /// Final navigation target, after rule overrides.
    pub target_url: String,
    /// Display title for the redirect interstitial, if the link has one.
    pub title: Option<String>,
}

/// Lifecycle of one resolution attempt.
///
/// A resolver starts in `Idle`, moves to `Loading` when a lookup begins,
/// and lands in exactly one of the three terminal states. Terminal states
/// are sticky per slug: resolving the same slug again returns the settled
/// state without re-fetching or re-tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResolveState {
    #[default]
    Idle,
    Loading,
    Resolved(Resolution),
    /// The slug is missing, unknown, inactive, or expired.
    NotFound { message: String },
    /// The lookup itself failed; retrying may succeed.
    Failed { message: String },
}

impl ResolveState {
    /// Whether this state ends a resolution attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Resolved(_) | Self::NotFound { .. } | Self::Failed { .. }
        )
    }

    /// The URL to navigate to, present only when resolved.
    pub fn resolved_url(&self) -> Option<&str> {
        match self {
            Self::Resolved(resolution) => Some(&resolution.target_url),
            _ => None,
        }
    }

    /// The user-facing message of a failed or not-found outcome.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::NotFound { message } | Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}
