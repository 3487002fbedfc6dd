use jiff::Zoned;
use typed_builder::TypedBuilder;

/// Request-time signals the resolver reads from its host.
///
/// In a browser-like embedding these map onto the clock, the navigator's
/// user agent and language, the document referrer, and the address of the
/// page handling the redirect. The runtime context is captured fresh from
/// this trait at every resolution and never cached.
pub trait Environment: Send + Sync + 'static {
    /// Current wall-clock time in the environment's local time zone.
    fn now(&self) -> Zoned;

    /// Raw user-agent string, if the host exposes one.
    fn user_agent(&self) -> Option<String>;

    /// Preferred UI language, e.g. `en-US`.
    fn language(&self) -> Option<String>;

    /// Referrer of the visit, absent for direct navigation.
    fn referrer(&self) -> Option<String>;

    /// Full URL of the page handling the redirect, including the query
    /// string UTM parameters are read from.
    fn page_url(&self) -> Option<String>;
}

/// A fixed [`Environment`] for tests and non-interactive embeddings.
#[derive(Debug, Clone, TypedBuilder)]
pub struct StaticEnvironment {
    #[builder(default = Zoned::now())]
    pub now: Zoned,
    #[builder(default, setter(strip_option, into))]
    pub user_agent: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub language: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub referrer: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub page_url: Option<String>,
}

impl Environment for StaticEnvironment {
    fn now(&self) -> Zoned {
        self.now.clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn referrer(&self) -> Option<String> {
        self.referrer.clone()
    }

    fn page_url(&self) -> Option<String> {
        self.page_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_absent_signals() {
        let env = StaticEnvironment::builder().build();
        assert!(env.user_agent().is_none());
        assert!(env.language().is_none());
        assert!(env.referrer().is_none());
        assert!(env.page_url().is_none());
    }

    #[test]
    fn builder_sets_signals() {
        let env = StaticEnvironment::builder()
            .user_agent("Mozilla/5.0")
            .language("en-US")
            .referrer("https://news.example/article")
            .build();
        assert_eq!(env.user_agent().as_deref(), Some("Mozilla/5.0"));
        assert_eq!(env.language().as_deref(), Some("en-US"));
        assert_eq!(
            env.referrer().as_deref(),
            Some("https://news.example/article")
        );
    }
}
