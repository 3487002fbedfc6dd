use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;
use url::Url;
use waypost_core::{ClickEvent, ClickSink, Environment, LinkId, UtmParams};
use waypost_useragent::device_info;

/// Best-effort click recorder.
///
/// The event is assembled synchronously from the environment, then written
/// on a spawned task so recording never delays or fails a redirect. Write
/// errors are logged and dropped.
#[derive(Clone)]
pub struct ClickTracker {
    sink: Arc<dyn ClickSink>,
}

impl ClickTracker {
    pub fn new(sink: Arc<dyn ClickSink>) -> Self {
        Self { sink }
    }

    /// Records a click for `link_id`. The returned handle is only useful
    /// for tests that need to await the write.
    pub fn track(&self, link_id: LinkId, env: &impl Environment) -> JoinHandle<()> {
        let event = build_event(link_id, env);
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(err) = sink.record(event).await {
                warn!(error = %err, "click recording failed, dropping event");
            }
        })
    }
}

fn build_event(link_id: LinkId, env: &impl Environment) -> ClickEvent {
    let user_agent = env.user_agent();
    let info = user_agent.as_deref().map(device_info);

    ClickEvent {
        link_id,
        referrer: env.referrer(),
        user_agent,
        device_type: info.as_ref().map(|info| info.device_type),
        browser: info.as_ref().map(|info| info.browser.name.to_string()),
        browser_version: info.as_ref().and_then(|info| info.browser.version.clone()),
        os: info.as_ref().map(|info| info.os.name.to_string()),
        os_version: info.as_ref().and_then(|info| info.os.version.clone()),
        utm: env
            .page_url()
            .as_deref()
            .map(utm_from_url)
            .unwrap_or_default(),
    }
}

/// Reads UTM parameters from a page URL's query string. Unparseable URLs
/// and empty parameter values yield no parameters.
fn utm_from_url(page_url: &str) -> UtmParams {
    let Ok(url) = Url::parse(page_url) else {
        return UtmParams::default();
    };

    let mut utm = UtmParams::default();
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        let value = Some(value.into_owned());
        match key.as_ref() {
            "utm_source" => utm.source = value,
            "utm_medium" => utm.medium = value,
            "utm_campaign" => utm.campaign = value,
            "utm_term" => utm.term = value,
            "utm_content" => utm.content = value,
            _ => {}
        }
    }
    utm
}
