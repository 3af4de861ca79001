//! Dashboard — inspect and edit guild configuration from a terminal.
//!
//! # Usage
//!
//! ```text
//! dashboard [--base-url <url>] [--json] guilds
//! dashboard [--base-url <url>] [--json] categories <guild-id> [--update <json>]
//! dashboard [--base-url <url>] [--json] profile [set --name <name> --description <text>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{categories::CategoriesArgs, guilds::GuildsArgs, profile::ProfileArgs, Session};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "dashboard",
    version,
    about = "Fetch and edit Discord guild dashboard settings",
    long_about = None,
)]
struct Cli {
    /// Backend origin; overrides `base_url` in ~/.dashboard/config.yaml.
    #[arg(long, global = true, env = "DASHBOARD_URL")]
    base_url: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log synchronizer activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the guilds visible to the signed-in user.
    Guilds(GuildsArgs),

    /// Show or update the option categories of a guild.
    Categories(CategoriesArgs),

    /// Show or edit the settings of the current guild.
    Profile(ProfileArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = Session::load(cli.base_url, cli.json)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Guilds(args) => args.run(&session).await,
            Commands::Categories(args) => args.run(&session).await,
            Commands::Profile(args) => args.run(&session).await,
        }
    })
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
