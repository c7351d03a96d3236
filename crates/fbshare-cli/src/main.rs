//! fbshare CLI - Mirror and share files on a File Browser server
//!
//! Provides commands for:
//! - Downloading a URL, uploading it and sharing it in one step
//! - Checking credentials
//! - Inspecting, uploading, deleting and sharing remote paths
//! - Managing the configuration file

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    config::ConfigCommand, delete::DeleteCommand, info::InfoCommand, link::LinkCommand,
    login::LoginCommand, share::ShareCommand, upload::UploadCommand, GlobalArgs, Settings,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "fbshare",
    version,
    about = "Save files from the web to File Browser and share them"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download a URL, store it on the server and share it
    Share(ShareCommand),
    /// Check the configured credentials
    Login(LoginCommand),
    /// Show metadata of a remote path
    Info(InfoCommand),
    /// Upload a local file
    Upload(UploadCommand),
    /// Delete a remote path
    Delete(DeleteCommand),
    /// Create a share link for a remote path
    Link(LinkCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::resolve(&cli.global)?;

    // Setup tracing; logs go to stderr, as JSON lines under --json
    let filter = match cli.verbose {
        0 => settings.config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Share(cmd) => cmd.execute(&settings, format).await,
        Commands::Login(cmd) => cmd.execute(&settings, format).await,
        Commands::Info(cmd) => cmd.execute(&settings, format).await,
        Commands::Upload(cmd) => cmd.execute(&settings, format).await,
        Commands::Delete(cmd) => cmd.execute(&settings, format).await,
        Commands::Link(cmd) => cmd.execute(&settings, format).await,
        Commands::Config(cmd) => cmd.execute(&settings, format).await,
    }
}
