use jiff::civil::Weekday;
use typed_builder::TypedBuilder;
use waypost_core::{DeviceType, Environment};
use waypost_useragent::classify_device;

/// Request-time signals a rule set is evaluated against.
///
/// Captured fresh from the [`Environment`] at every resolution and never
/// cached, so time- and device-sensitive rules always see current values.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RuntimeContext {
    /// Local hour of day, 0-23.
    pub hour: i8,
    pub weekday: Weekday,
    #[builder(default = DeviceType::Other)]
    pub device: DeviceType,
    /// Browser language, e.g. `en-US`; empty when the host exposes none.
    #[builder(default, setter(into))]
    pub language: String,
    #[builder(default, setter(strip_option, into))]
    pub referrer: Option<String>,
}

impl RuntimeContext {
    /// Captures a context from the host environment.
    pub fn capture(env: &impl Environment) -> Self {
        let now = env.now();
        Self {
            hour: now.hour(),
            weekday: now.weekday(),
            device: env
                .user_agent()
                .as_deref()
                .map_or(DeviceType::Other, classify_device),
            language: env.language().unwrap_or_default(),
            referrer: env.referrer(),
        }
    }

    /// Sunday-based day number, 0 = Sunday through 6 = Saturday.
    pub fn day_number(&self) -> i8 {
        self.weekday.to_sunday_zero_offset()
    }

    /// Monday through Friday.
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Saturday | Weekday::Sunday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use waypost_core::StaticEnvironment;

    #[test]
    fn capture_derives_all_signals() {
        // 2025-06-11 was a Wednesday.
        let now = date(2025, 6, 11)
            .at(14, 30, 0, 0)
            .in_tz("UTC")
            .unwrap();
        let env = StaticEnvironment::builder()
            .now(now)
            .user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X)")
            .language("en-US")
            .referrer("https://news.example/article")
            .build();

        let ctx = RuntimeContext::capture(&env);
        assert_eq!(ctx.hour, 14);
        assert_eq!(ctx.weekday, Weekday::Wednesday);
        assert_eq!(ctx.day_number(), 3);
        assert!(ctx.is_weekday());
        assert_eq!(ctx.device, DeviceType::Mobile);
        assert_eq!(ctx.language, "en-US");
        assert_eq!(ctx.referrer.as_deref(), Some("https://news.example/article"));
    }

    #[test]
    fn capture_tolerates_absent_signals() {
        let ctx = RuntimeContext::capture(&StaticEnvironment::builder().build());
        assert_eq!(ctx.device, DeviceType::Other);
        assert_eq!(ctx.language, "");
        assert!(ctx.referrer.is_none());
    }

    #[test]
    fn weekend_detection() {
        let saturday = RuntimeContext::builder()
            .hour(10)
            .weekday(Weekday::Saturday)
            .build();
        assert!(saturday.is_weekend());
        assert!(!saturday.is_weekday());
        assert_eq!(saturday.day_number(), 6);

        let sunday = RuntimeContext::builder()
            .hour(10)
            .weekday(Weekday::Sunday)
            .build();
        assert!(sunday.is_weekend());
        assert_eq!(sunday.day_number(), 0);
    }
}
