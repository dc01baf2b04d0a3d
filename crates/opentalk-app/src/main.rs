use clap::Parser;
use opentalk_app::cli::{Cli, Command};
use opentalk_app::commands;
use opentalk_app::logging::{apply_level, init_logging};
use opentalk_core::config::load_config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter_handle = init_logging("warn");

    let settings = load_config(cli.config.as_deref())?;
    tracing::debug!(config = ?settings, "Configuration loaded");
    apply_level(&filter_handle, &settings.logging.level);
    tracing::debug!(command = ?cli.command, "Running command");

    let output = match &cli.command {
        Command::Expand(args) => commands::expand(args, &settings)?,
        Command::SuggestStart { at } => commands::suggest_start(*at),
        Command::DescribeRule(args) => commands::describe_rule(args)?,
    };
    println!("{output}");

    Ok(())
}
