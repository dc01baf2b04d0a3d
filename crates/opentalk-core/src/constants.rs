/// Number of calendar months a recurring event is expanded into the future
/// (or the past) when no other span is configured.
pub const DEFAULT_MAX_MONTHS: u32 = 3;

/// Minutes past the hour that `round_to_upper_30` snaps to.
pub const HALF_HOUR_MINUTES: u32 = 30;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "OPENTALK";
