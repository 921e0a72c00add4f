use super::{Environment, CLIENT_ID_VAR, CLIENT_SECRET_VAR, FILE_KEY_VAR};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use tokio::net::TcpListener;
use tracing::{debug, instrument};

/// Ports the local authorization callback may listen on, in preference order
pub const CALLBACK_PORTS: [u16; 2] = [3000, 3001];

#[derive(Debug, Args)]
pub struct OauthCheckArgs {}

async fn port_available(port: u16) -> bool {
    let available = TcpListener::bind(("127.0.0.1", port)).await.is_ok();
    debug!(port, available, "Checked callback port");
    available
}

fn status(present: bool) -> colored::ColoredString {
    if present {
        "OK".green()
    } else {
        "NOT FOUND".red()
    }
}

/// Redirect URIs to register, given which callback ports are free
pub fn redirect_hints(primary_free: bool, fallback_free: bool) -> Vec<String> {
    let [primary, fallback] = CALLBACK_PORTS;
    let uri = |port: u16| format!("http://localhost:{}/callback", port);

    match (primary_free, fallback_free) {
        (true, true) => vec![
            format!("{} (primary)", uri(primary)),
            format!("{} (fallback)", uri(fallback)),
        ],
        (true, false) => vec![format!("{} (primary)", uri(primary))],
        (false, true) => vec![
            format!("{} (port busy)", uri(primary)),
            format!("{} (will be used)", uri(fallback)),
        ],
        (false, false) => vec![format!("Both ports ({}, {}) are busy!", primary, fallback)],
    }
}

#[instrument(skip_all)]
pub async fn oauth_check(_args: OauthCheckArgs, env: &Environment) -> Result<()> {
    println!("{}", "Checking OAuth configuration".bright_blue().bold());
    println!();

    println!("OAuth credentials:");
    println!("  {}: {}", CLIENT_ID_VAR, status(env.client_id.is_some()));
    println!("  {}: {}", CLIENT_SECRET_VAR, status(env.client_secret.is_some()));
    println!("  {}: {}", FILE_KEY_VAR, status(env.file_key.is_some()));
    println!();

    let Some(client_id) = &env.client_id else {
        return Err(anyhow!("OAuth credentials not configured"));
    };
    if env.client_secret.is_none() {
        return Err(anyhow!("OAuth credentials not configured"));
    }

    let primary_free = port_available(CALLBACK_PORTS[0]).await;
    let fallback_free = port_available(CALLBACK_PORTS[1]).await;

    println!("Checking ports:");
    for (port, free) in CALLBACK_PORTS.iter().zip([primary_free, fallback_free]) {
        let state = if free { "available".green() } else { "busy".yellow() };
        println!("  Port {}: {}", port, state);
    }
    println!();

    println!("Recommended redirect URIs for the app (client id {}):", client_id);
    for hint in redirect_hints(primary_free, fallback_free) {
        println!("  {}", hint);
    }
    Ok(())
}
