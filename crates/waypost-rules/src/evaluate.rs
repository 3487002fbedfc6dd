use crate::context::RuntimeContext;
use waypost_core::{ConditionType, DeviceType, RedirectRule};

/// Selects the first active rule whose condition matches the context.
///
/// Rules are considered in ascending `priority` order regardless of input
/// order (the sort is stable, so ties keep their relative order), inactive
/// rules are skipped, and evaluation short-circuits at the first match.
/// `None` means no override: the caller falls back to the link's default
/// destination. The input is not mutated.
pub fn first_match<'a>(
    rules: &'a [RedirectRule],
    ctx: &RuntimeContext,
) -> Option<&'a RedirectRule> {
    let mut ordered: Vec<&RedirectRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);

    ordered
        .into_iter()
        .filter(|rule| rule.active)
        .find(|rule| condition_matches(rule, ctx))
}

fn condition_matches(rule: &RedirectRule, ctx: &RuntimeContext) -> bool {
    match rule.condition_type {
        ConditionType::TimeOfDay => hour_window_matches(&rule.condition_value, ctx.hour),
        ConditionType::DayOfWeek => day_matches(&rule.condition_value, ctx),
        // Only "mobile" and "desktop" are recognized values; tablet and TV
        // contexts can never satisfy a device_type condition. Known gap,
        // kept for parity with stored rule data.
        ConditionType::DeviceType => match rule.condition_value.as_str() {
            "mobile" => ctx.device == DeviceType::Mobile,
            "desktop" => ctx.device == DeviceType::Desktop,
            _ => false,
        },
        ConditionType::Language => ctx.language.starts_with(&rule.condition_value),
        ConditionType::Referrer => ctx
            .referrer
            .as_deref()
            .is_some_and(|referrer| referrer.contains(&rule.condition_value)),
        ConditionType::Always => true,
        ConditionType::Unknown => false,
    }
}

/// Matches a `"start-end"` hour window, start inclusive, end exclusive.
/// Malformed values never match.
fn hour_window_matches(value: &str, hour: i8) -> bool {
    let Some((start, end)) = value.split_once('-') else {
        return false;
    };
    let (Ok(start), Ok(end)) = (start.trim().parse::<i8>(), end.trim().parse::<i8>()) else {
        return false;
    };
    start <= hour && hour < end
}

/// Matches `"weekday"`, `"weekend"`, or an exact day number 0-6 (Sunday=0).
fn day_matches(value: &str, ctx: &RuntimeContext) -> bool {
    match value {
        "weekday" => ctx.is_weekday(),
        "weekend" => ctx.is_weekend(),
        _ => value
            .parse::<i8>()
            .is_ok_and(|day| (0..=6).contains(&day) && ctx.day_number() == day),
    }
}
