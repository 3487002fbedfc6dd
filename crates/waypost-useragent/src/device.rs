use waypost_core::DeviceType;

const TV_TOKENS: &[&str] = &[
    "smart-tv",
    "smarttv",
    "googletv",
    "appletv",
    "playstation",
    "xbox",
    "nintendo",
    "roku",
];

const MOBILE_TOKENS: &[&str] = &[
    "mobile",
    "iphone",
    "ipod",
    "android",
    "blackberry",
    "windows phone",
];

const DESKTOP_TOKENS: &[&str] = &["windows", "mac", "linux", "cros"];

/// Maps a raw user-agent string to the device taxonomy.
///
/// Disambiguation order: TV/console signatures, then tablets, then mobile,
/// then desktop OS tokens, then [`DeviceType::Other`]. Tablets are checked
/// before desktop because tablet UAs routinely carry desktop OS substrings
/// (iPads claim "like Mac OS X"), and the tablet check excludes anything
/// advertising "mobile" because Android phones advertise "android" too.
pub fn classify_device(user_agent: &str) -> DeviceType {
    if user_agent.is_empty() {
        return DeviceType::Other;
    }

    let ua = user_agent.to_lowercase();

    if TV_TOKENS.iter().any(|token| ua.contains(token)) {
        return DeviceType::Tv;
    }

    let tablet_signature = ua.contains("ipad")
        || (ua.contains("android") && !ua.contains("mobile"))
        || ua.contains("tablet")
        || ua.contains("kindle")
        || ua.contains("silk");
    if tablet_signature && !ua.contains("mobile") {
        return DeviceType::Tablet;
    }

    if MOBILE_TOKENS.iter().any(|token| ua.contains(token)) {
        return DeviceType::Mobile;
    }

    if DESKTOP_TOKENS.iter().any(|token| ua.contains(token)) {
        return DeviceType::Desktop;
    }

    DeviceType::Other
}
