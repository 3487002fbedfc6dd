use crate::version::version_after;

/// Browser name and optional `major` or `major.minor` version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserInfo {
    pub name: &'static str,
    pub version: Option<String>,
}

impl BrowserInfo {
    fn new(name: &'static str, version: Option<String>) -> Self {
        Self { name, version }
    }
}

/// Identifies the browser behind a user-agent string.
///
/// Precedence matters: Chromium-based Edge and Opera UAs also contain
/// "chrome", and mobile Chrome UAs also contain "safari", so Edge and Opera
/// are checked before Chrome, and Safari only counts when "chrome" is
/// absent.
pub fn classify_browser(user_agent: &str) -> BrowserInfo {
    if user_agent.is_empty() {
        return BrowserInfo::new("Unknown", None);
    }

    let ua = user_agent.to_lowercase();

    if ua.contains("edg/") {
        return BrowserInfo::new("Edge", version_after(&ua, "edg/"));
    }

    if ua.contains("opr/") || ua.contains("opera") {
        let version = version_after(&ua, "opr/").or_else(|| version_after(&ua, "opera/"));
        return BrowserInfo::new("Opera", version);
    }

    if ua.contains("chrome") {
        return BrowserInfo::new("Chrome", version_after(&ua, "chrome/"));
    }

    if ua.contains("safari") && !ua.contains("chrome") {
        return BrowserInfo::new("Safari", version_after(&ua, "version/"));
    }

    if ua.contains("firefox") {
        return BrowserInfo::new("Firefox", version_after(&ua, "firefox/"));
    }

    if ua.contains("msie") || ua.contains("trident") {
        let version = version_after(&ua, "msie ").or_else(|| version_after(&ua, "rv:"));
        return BrowserInfo::new("Internet Explorer", version);
    }

    BrowserInfo::new("Other", None)
}
