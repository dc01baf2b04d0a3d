use chrono::{DateTime, Utc};
use opentalk_core::config::{ScheduleConfig, Settings};
use opentalk_core::model::{DateTimeTz, DateTimeTzResource, Event};
use opentalk_core::util::{round_to_upper_30, suggested_start};
use opentalk_rrule::RecurrencePattern;
use opentalk_service::schedule::{build_schedule, retain_invite_status};
use serde::Serialize;

use crate::cli::{DescribeRuleArgs, ExpandArgs};
use crate::error::{AppError, AppResult};

/// ## Summary
/// Reads the event list named in `args`, expands it with the configured
/// schedule settings and the command line overrides, and renders the ordered
/// result as pretty JSON.
///
/// ## Errors
/// Returns an error if the file cannot be read or parsed, the resulting
/// configuration is invalid, or a recurrence fails to expand.
pub fn expand(args: &ExpandArgs, settings: &Settings) -> AppResult<String> {
    let raw = std::fs::read_to_string(&args.file).map_err(|source| AppError::ReadError {
        path: args.file.display().to_string(),
        source,
    })?;
    let events: Vec<Event> = serde_json::from_str(&raw)?;

    let config = schedule_overrides(&settings.schedule, args);
    let now = args.now.unwrap_or_else(Utc::now);

    tracing::info!(
        file = %args.file.display(),
        events = events.len(),
        perspective = %config.default_perspective,
        max_months = config.max_months,
        "Expanding schedule"
    );

    let mut schedule = build_schedule(events, &config, now, args.order)?;
    if let Some(status) = args.invite_status {
        schedule = retain_invite_status(schedule, status);
    }
    Ok(serde_json::to_string_pretty(&schedule)?)
}

fn schedule_overrides(base: &ScheduleConfig, args: &ExpandArgs) -> ScheduleConfig {
    let mut config = base.clone();
    if let Some(perspective) = args.perspective {
        config.default_perspective = perspective;
    }
    if let Some(max_months) = args.max_months {
        config.max_months = max_months;
    }
    if args.include_declined {
        config.filter_declined_invites = false;
    }
    config
}

/// Default start for a new meeting, as RFC 3339.
#[must_use]
pub fn suggest_start(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(suggested_start, round_to_upper_30).to_rfc3339()
}

#[derive(Debug, Serialize)]
struct RuleDescription {
    rule: String,
    pattern: RecurrencePattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    checked_against: Option<DateTimeTzResource>,
}

/// ## Summary
/// Parses `args.rule` into a [`RecurrencePattern`] and renders it together
/// with its canonical RRULE text. With `--start` the pattern is also
/// validated against a meeting starting then in `--timezone`.
///
/// ## Errors
/// Returns `AppError::RecurrenceError` if the rule is malformed, uses parts
/// the pattern model does not cover, or does not fit the given start, and
/// `AppError::CoreError` if the zone is unknown.
pub fn describe_rule(args: &DescribeRuleArgs) -> AppResult<String> {
    let pattern = RecurrencePattern::parse(&args.rule)?;

    let checked_against = match args.start {
        Some(datetime) => {
            let starts_at = DateTimeTz::try_from(DateTimeTzResource {
                datetime,
                timezone: args.timezone.clone(),
            })?;
            pattern.validate(&starts_at)?;
            Some(starts_at.into())
        }
        None => None,
    };

    let description = RuleDescription {
        rule: pattern.to_string(),
        pattern,
        checked_against,
    };
    Ok(serde_json::to_string_pretty(&description)?)
}
