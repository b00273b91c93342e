mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use steme_core::config::StemeConfig;
use tracing_subscriber::EnvFilter;

use crate::commands::calendar::CalendarArgs;
use crate::commands::profile::ProfileArgs;

#[derive(Parser)]
#[command(name = "steme")]
#[command(about = "Browse the steme calendar and profile screens from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month page with the current selection
    Calendar {
        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Page to this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Press this day (YYYY-MM-DD)
        #[arg(short, long)]
        select: Option<String>,

        /// Print the renderer inputs as JSON instead of drawing the page
        #[arg(long)]
        json: bool,
    },
    /// Show the profile header for a session
    Profile {
        /// Sign in as this user id (signed out if omitted)
        #[arg(long)]
        uid: Option<String>,

        /// Display name of the signed-in user
        #[arg(long)]
        name: Option<String>,

        /// Avatar URI to serve for the user instead of looking it up
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Show or create the config file
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Calendar {
            today,
            month,
            select,
            json,
        } => {
            let config = StemeConfig::load()?;
            commands::calendar::run(
                &config,
                CalendarArgs {
                    today,
                    month,
                    select,
                    json,
                },
            )
        }
        Commands::Profile { uid, name, avatar } => {
            let config = StemeConfig::load()?;
            commands::profile::run(&config, ProfileArgs { uid, name, avatar }).await
        }
        Commands::Config { init } => commands::config::run(init),
    }
}
