//! Pure user-agent classification for the Waypost redirect engine.
//!
//! Every classifier in this crate is a total function: arbitrary input,
//! including the empty string, maps to a defined "other"/"unknown" variant
//! without panicking. No I/O, no state.

mod browser;
mod device;
mod os;
mod version;

pub use browser::{classify_browser, BrowserInfo};
pub use device::classify_device;
pub use os::{classify_os, OsInfo};

use waypost_core::DeviceType;

/// Complete classification of a user-agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_type: DeviceType,
    pub browser: BrowserInfo,
    pub os: OsInfo,
}

/// Runs all three classifiers over one user-agent string.
pub fn device_info(user_agent: &str) -> DeviceInfo {
    DeviceInfo {
        device_type: classify_device(user_agent),
        browser: classify_browser(user_agent),
        os: classify_os(user_agent),
    }
}
