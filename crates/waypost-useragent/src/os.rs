use crate::version::{dotted_pair_after, version_after};

/// Operating system name and optional version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInfo {
    pub name: &'static str,
    pub version: Option<String>,
}

impl OsInfo {
    fn new(name: &'static str, version: Option<String>) -> Self {
        Self { name, version }
    }
}

/// Windows NT token to marketing version.
const WINDOWS_NT_VERSIONS: &[(&str, &str)] = &[
    ("windows nt 10.0", "10"),
    ("windows nt 6.3", "8.1"),
    ("windows nt 6.2", "8"),
    ("windows nt 6.1", "7"),
];

/// Identifies the operating system behind a user-agent string.
///
/// iOS is checked via device tokens before any "mac" check because iOS
/// Safari UAs also claim "like Mac OS X"; Android before the generic
/// "linux" check for the same reason.
pub fn classify_os(user_agent: &str) -> OsInfo {
    if user_agent.is_empty() {
        return OsInfo::new("Unknown", None);
    }

    let ua = user_agent.to_lowercase();

    if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        return OsInfo::new("iOS", dotted_pair_after(&ua, "os "));
    }

    if ua.contains("android") {
        return OsInfo::new("Android", version_after(&ua, "android "));
    }

    if ua.contains("windows") {
        let version = WINDOWS_NT_VERSIONS
            .iter()
            .find(|(token, _)| ua.contains(token))
            .map(|(_, version)| version.to_string());
        return OsInfo::new("Windows", version);
    }

    if ua.contains("mac os x") {
        return OsInfo::new("macOS", dotted_pair_after(&ua, "mac os x "));
    }

    if ua.contains("linux") {
        if ua.contains("ubuntu") {
            return OsInfo::new("Ubuntu", None);
        }
        if ua.contains("debian") {
            return OsInfo::new("Debian", None);
        }
        if ua.contains("fedora") {
            return OsInfo::new("Fedora", None);
        }
        if ua.contains("centos") {
            return OsInfo::new("CentOS", None);
        }
        return OsInfo::new("Linux", None);
    }

    if ua.contains("cros") {
        return OsInfo::new("Chrome OS", None);
    }

    OsInfo::new("Unknown", None)
}
