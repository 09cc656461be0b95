use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use shared::config::ClientConfig;
use shared::models::{InviteRequest, LinkRequest, PairingCode};

use super::session;

#[derive(Args, Debug)]
pub struct InviteArgs {
    /// Partner's email address, used by the backend to address the invite
    #[arg(long, short)]
    pub email: String,

    /// Base URL of the OurSpace backend (overrides config file and environment)
    #[arg(long, short)]
    pub server: Option<String>,

    /// Path to the configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Invite code received from your partner
    #[arg(long, short)]
    pub code: String,

    /// Base URL of the OurSpace backend (overrides config file and environment)
    #[arg(long, short)]
    pub server: Option<String>,

    /// Path to the configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn invite(args: InviteArgs) -> Result<()> {
    let config = ClientConfig::load_config(args.config.clone(), args.server.clone())?;
    let origin = config.origin()?;
    let jar_path = session::session_path();

    let jar = session::load_cookie_jar(&origin, &jar_path)
        .with_context(|| "no active session found; run `ourspace login` first")?;
    let mut client = session::build_client(&config, jar.clone())?;

    let code = match client
        .invite_partner(&InviteRequest {
            email: args.email.clone(),
        })
        .await
    {
        Ok(code) => code,
        Err(err) => bail!("{}", err.user_message()),
    };

    session::persist_cookie_jar(&jar, &origin, &jar_path)?;
    println!("Invite code: {}", code);
    println!("Share this code with your partner so they can run `ourspace link`.");
    Ok(())
}

pub async fn link(args: LinkArgs) -> Result<()> {
    let code = match PairingCode::parse(&args.code) {
        Ok(code) => code,
        Err(err) => bail!("invalid pairing code: {}", err),
    };

    let config = ClientConfig::load_config(args.config.clone(), args.server.clone())?;
    let origin = config.origin()?;
    let jar_path = session::session_path();

    let jar = session::load_cookie_jar(&origin, &jar_path)
        .with_context(|| "no active session found; run `ourspace login` first")?;
    let mut client = session::build_client(&config, jar.clone())?;

    let couple_id = match client.link_partner(&LinkRequest { code }).await {
        Ok(couple_id) => couple_id,
        Err(err) => bail!("{}", err.user_message()),
    };

    session::persist_cookie_jar(&jar, &origin, &jar_path)?;
    println!("Linked! You and your partner now share couple {}", couple_id);
    Ok(())
}
