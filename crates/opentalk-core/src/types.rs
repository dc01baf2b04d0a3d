use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lens selected in the dashboard that decides which occurrences are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TimePerspectiveFilter {
    TimeIndependent,
    #[default]
    Future,
    Past,
}

impl TimePerspectiveFilter {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeIndependent => "time_independent",
            Self::Future => "future",
            Self::Past => "past",
        }
    }
}

impl std::fmt::Display for TimePerspectiveFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimePerspectiveFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "time_independent" | "timeindependent" => Ok(Self::TimeIndependent),
            "future" => Ok(Self::Future),
            "past" => Ok(Self::Past),
            other => Err(CoreError::ParseError(format!(
                "unknown time perspective: {other}"
            ))),
        }
    }
}

/// Response of the current user to a meeting invite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum InviteStatus {
    #[default]
    Accepted,
    Tentative,
    Pending,
    Declined,
}

impl InviteStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Tentative => "tentative",
            Self::Pending => "pending",
            Self::Declined => "declined",
        }
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chronological ordering applied to event lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}
