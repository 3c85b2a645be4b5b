use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "esg-report")]
#[command(about = "ESG report composition and history", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User whose selections and history are used
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage the metric selection working set
    Selection {
        #[command(subcommand)]
        action: commands::selection::SelectionAction,
    },
    /// Score the working set and save the result to history
    Generate(commands::generate::GenerateArgs),
    /// Inspect saved reports
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::load(cli.config, cli.user)?;
    commands::logging::init(&ctx.config.log_level);

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(&ctx, force)?,
            ConfigAction::Show => commands::config::show(&ctx)?,
        },
        Commands::Selection { action } => commands::selection::run(&ctx, action).await?,
        Commands::Generate(args) => commands::generate::run(&ctx, args).await?,
        Commands::History { action } => commands::history::run(&ctx, action).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_name_requires_combine() {
        assert!(Cli::try_parse_from(["esg-report", "generate", "--name", "Q1"]).is_err());
        assert!(
            Cli::try_parse_from(["esg-report", "generate", "--combine", "--name", "Q1"]).is_ok()
        );
    }
}
