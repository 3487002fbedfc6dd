/// Returns the `major` or `major.minor` version following `marker`.
///
/// Scans every occurrence of `marker` and takes the first one followed by
/// digits, truncating anything past the minor component (so `chrome/120.0.6099`
/// yields `120.0`).
pub(crate) fn version_after(ua: &str, marker: &str) -> Option<String> {
    for (index, _) in ua.match_indices(marker) {
        let rest = &ua[index + marker.len()..];
        let major = leading_digits(rest);
        if major.is_empty() {
            continue;
        }

        let rest = &rest[major.len()..];
        if let Some(rest) = rest.strip_prefix('.') {
            let minor = leading_digits(rest);
            if !minor.is_empty() {
                return Some(format!("{}.{}", major, minor));
            }
        }
        return Some(major.to_string());
    }
    None
}

/// Returns a `major.minor` pair following `marker`, where the separator is
/// either `.` or `_` (Apple platform versions use underscores).
///
/// Both components must be present; a lone major yields `None`.
pub(crate) fn dotted_pair_after(ua: &str, marker: &str) -> Option<String> {
    for (index, _) in ua.match_indices(marker) {
        let rest = &ua[index + marker.len()..];
        let major = leading_digits(rest);
        if major.is_empty() {
            continue;
        }

        let rest = &rest[major.len()..];
        let Some(rest) = rest.strip_prefix(['.', '_']) else {
            continue;
        };
        let minor = leading_digits(rest);
        if minor.is_empty() {
            continue;
        }
        return Some(format!("{}.{}", major, minor));
    }
    None
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}
