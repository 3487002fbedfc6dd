use crate::device::DeviceType;
use crate::link::LinkId;
use serde::{Deserialize, Serialize};

/// UTM campaign parameters read from the redirect page's query string.
///
/// Absent parameters stay `None`; they are never recorded as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    #[serde(rename = "utm_source")]
    pub source: Option<String>,
    #[serde(rename = "utm_medium")]
    pub medium: Option<String>,
    #[serde(rename = "utm_campaign")]
    pub campaign: Option<String>,
    #[serde(rename = "utm_term")]
    pub term: Option<String>,
    #[serde(rename = "utm_content")]
    pub content: Option<String>,
}

/// A recorded visit, written once per resolved redirect.
///
/// The event timestamp and any click-count aggregation on the link are
/// assigned by the persistence layer, not here. Write-only from this
/// core's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub link_id: LinkId,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: Option<DeviceType>,
    pub browser: Option<String>,
    pub browser_version: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    #[serde(flatten)]
    pub utm: UtmParams,
}
