//! Main entry point for the OurSpace terminal client.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::error::Error;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::couple::{InviteArgs, LinkArgs};
use commands::session::{LoginArgs, RegisterArgs, StatusArgs};

/// OurSpace CLI
#[derive(Parser)]
#[command(name = "ourspace")]
#[command(about = "Terminal client for the OurSpace couples platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the OurSpace CLI
#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session cookies locally
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Show who is signed in and whether the account is paired
    Status(StatusArgs),

    /// Remove the locally stored session cookies
    Logout,

    /// Mint an invite code to send to your partner
    Invite(InviteArgs),

    /// Redeem an invite code to pair with your partner
    Link(LinkArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login(args) => commands::session::login(args).await?,
        Commands::Register(args) => commands::session::register(args).await?,
        Commands::Status(args) => commands::session::status(args).await?,
        Commands::Logout => commands::session::logout()?,
        Commands::Invite(args) => commands::couple::invite(args).await?,
        Commands::Link(args) => commands::couple::link(args).await?,
    }

    Ok(())
}
