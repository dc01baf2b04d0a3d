use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use opentalk_core::types::{InviteStatus, SortDirection, TimePerspectiveFilter};

/// Expands and orders OpenTalk meeting lists
#[derive(Debug, Parser)]
#[command(name = "opentalk-schedule", version, about)]
pub struct Cli {
    /// Configuration file, replaces `config.toml` in the working directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand the recurring events of a JSON event list into a schedule
    Expand(ExpandArgs),

    /// Print the default start time for a new meeting
    SuggestStart {
        /// Reference instant, defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Parse an RRULE and print its structured form
    DescribeRule(DescribeRuleArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExpandArgs {
    /// JSON file holding an array of events
    pub file: PathBuf,

    /// Time window to expand into, overrides `schedule.default_perspective`
    #[arg(short, long, value_enum)]
    pub perspective: Option<TimePerspectiveFilter>,

    /// Window length in months, overrides `schedule.max_months`
    #[arg(long)]
    pub max_months: Option<u32>,

    /// Keep single events whose invite was declined
    #[arg(long)]
    pub include_declined: bool,

    /// Only print events with this invite status
    #[arg(long, value_enum)]
    pub invite_status: Option<InviteStatus>,

    #[arg(long, value_enum, default_value_t = SortDirection::Asc)]
    pub order: SortDirection,

    /// Reference instant, defaults to now
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DescribeRuleArgs {
    /// Rule text, e.g. `FREQ=WEEKLY;BYDAY=MO,WE`
    pub rule: String,

    /// Meeting start to check the rule against
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// IANA zone of the meeting start, used with `--start`
    #[arg(long, default_value = "UTC")]
    pub timezone: String,
}
