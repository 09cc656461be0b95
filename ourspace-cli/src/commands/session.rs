use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use directories::BaseDirs;
use reqwest::cookie::{CookieStore, Jar};
use rpassword::prompt_password;
use url::Url;

use client::{OurSpaceClient, SessionState};
use shared::config::ClientConfig;
use shared::models::{CurrentUser, LoginRequest, RegisterRequest};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Base URL of the OurSpace backend (overrides config file and environment)
    #[arg(long, short)]
    pub server: Option<String>,

    /// Path to the configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Base URL of the OurSpace backend (overrides config file and environment)
    #[arg(long, short)]
    pub server: Option<String>,

    /// Path to the configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Base URL of the OurSpace backend (overrides config file and environment)
    #[arg(long, short)]
    pub server: Option<String>,

    /// Path to the configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub async fn login(args: LoginArgs) -> Result<()> {
    let config = ClientConfig::load_config(args.config.clone(), args.server.clone())?;
    let origin = config.origin()?;
    let jar_path = session_path();
    ensure_parent(&jar_path)?;

    let email = prompt("Email: ")?;
    let password = prompt_password("Password: ")?;
    if password.trim().is_empty() {
        bail!("password must not be empty");
    }

    let jar = Arc::new(Jar::default());
    let mut client = build_client(&config, jar.clone())?;

    let user = match client.login(&LoginRequest { email, password }).await {
        Ok(user) => user,
        Err(err) => bail!("{}", err.user_message()),
    };

    persist_cookie_jar(&jar, &origin, &jar_path)?;
    print_session_summary(&user, &jar_path);
    Ok(())
}

pub async fn register(args: RegisterArgs) -> Result<()> {
    let config = ClientConfig::load_config(args.config.clone(), args.server.clone())?;
    let origin = config.origin()?;
    let jar_path = session_path();
    ensure_parent(&jar_path)?;

    let name = prompt("Name: ")?;
    let email = prompt("Email: ")?;
    let password = prompt_password("Password: ")?;
    if password.trim().is_empty() {
        bail!("password must not be empty");
    }
    let password_confirmation = prompt_password("Confirm password: ")?;
    if password != password_confirmation {
        bail!("passwords do not match");
    }

    let jar = Arc::new(Jar::default());
    let mut client = build_client(&config, jar.clone())?;

    let user = match client
        .register(&RegisterRequest {
            name,
            email,
            password,
            password_confirmation,
        })
        .await
    {
        Ok(user) => user,
        Err(err) => bail!("{}", err.user_message()),
    };

    persist_cookie_jar(&jar, &origin, &jar_path)?;
    print_session_summary(&user, &jar_path);
    Ok(())
}

pub async fn status(args: StatusArgs) -> Result<()> {
    let config = ClientConfig::load_config(args.config.clone(), args.server.clone())?;
    let origin = config.origin()?;
    let jar_path = session_path();

    let jar = load_cookie_jar(&origin, &jar_path)
        .with_context(|| "no active session found; run `ourspace login` first")?;
    let mut client = build_client(&config, jar.clone())?;

    match client.bootstrap().await {
        SessionState::Authenticated(user) => {
            persist_cookie_jar(&jar, &origin, &jar_path)?;
            print_session_summary(&user, &jar_path);
        }
        _ => println!("Not signed in. Run `ourspace login` to sign in."),
    }

    Ok(())
}

pub fn logout() -> Result<()> {
    let jar_path = session_path();

    if jar_path.exists() {
        fs::remove_file(&jar_path)
            .with_context(|| format!("failed to remove session jar {}", jar_path.display()))?;
        println!("Removed session cookies at {}", jar_path.display());
    } else {
        println!("No session cookies found at {}", jar_path.display());
    }

    Ok(())
}

pub fn session_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("ourspace").join("session.cookies"))
        .unwrap_or_else(|| PathBuf::from("./session.cookies"))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim().to_string();
    if trimmed.is_empty() {
        bail!("input must not be empty");
    }
    Ok(trimmed)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create session directory {}", parent.display()))?;
    }
    Ok(())
}

pub fn build_client(config: &ClientConfig, jar: Arc<Jar>) -> Result<OurSpaceClient> {
    OurSpaceClient::with_jar(config, jar).map_err(|err| anyhow!("{}", err.user_message()))
}

pub fn load_cookie_jar(origin: &Url, path: &Path) -> Result<Arc<Jar>> {
    if !path.exists() {
        bail!("session cookie jar not found at {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session jar {}", path.display()))?;
    let jar = Arc::new(Jar::default());
    for entry in contents.split(';') {
        let cookie = entry.trim();
        if !cookie.is_empty() {
            jar.add_cookie_str(cookie, origin);
        }
    }
    Ok(jar)
}

pub fn persist_cookie_jar(jar: &Arc<Jar>, origin: &Url, path: &Path) -> Result<()> {
    if let Some(header) = jar.cookies(origin) {
        fs::write(path, header.to_str()?.as_bytes())
            .with_context(|| format!("failed to write session jar at {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .context("failed to set session jar permissions")?;
        }
        println!("Session cookies saved to {}", path.display());
    } else if path.exists() {
        fs::remove_file(path).ok();
    }
    Ok(())
}

fn print_session_summary(user: &CurrentUser, jar_path: &Path) {
    println!("Logged in as {}", user.email);
    println!("name: {}", user.name);
    match user.couple_id {
        Some(couple_id) => println!("paired: yes (couple {})", couple_id),
        None => println!("paired: no (run `ourspace invite` or `ourspace link` to pair)"),
    }
    if let Some(created_at) = &user.created_at {
        println!("member since: {}", created_at);
    }
    println!("cookies stored at {}", jar_path.display());
}
