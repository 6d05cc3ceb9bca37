//! Backend entry-point: wires persistence, domain services, and the HTTP
//! server.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use honours_backend::domain::FinalisePolicy;
use honours_backend::inbound::http::health::HealthState;
use honours_backend::outbound::persistence::{DbPool, PoolConfig};
use honours_backend::server::{ServerConfig, create_server};

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "honours-backend", about = "Honours nomination backend")]
struct Args {
    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Path to the session signing key material.
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    session_key_file: String,

    /// Permit an ephemeral session key when the key file is unreadable.
    /// Sessions will not survive a restart.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL", default_value_t = false)]
    session_allow_ephemeral: bool,

    /// Mark session cookies as Secure. Disable only for local development.
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = true)]
    cookie_secure: bool,

    /// Who may finalise nominations under review: "committee" or
    /// "admin-only".
    #[arg(long, env = "FINALISE_POLICY", default_value = "committee",
          value_parser = parse_finalise_policy)]
    finalise_policy: FinalisePolicy,
}

fn parse_finalise_policy(value: &str) -> Result<FinalisePolicy, String> {
    match value {
        "committee" => Ok(FinalisePolicy::Committee),
        "admin-only" => Ok(FinalisePolicy::AdminOnly),
        other => Err(format!(
            "unknown finalise policy '{other}' (expected 'committee' or 'admin-only')"
        )),
    }
}

fn load_session_key(path: &str, allow_ephemeral: bool) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || allow_ephemeral {
                warn!(path = %path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {path}: {e}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key(&args.session_key_file, args.session_allow_ephemeral)?;

    let pool = DbPool::new(PoolConfig::new(&args.database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool initialisation failed: {e}")))?;

    let config = ServerConfig::new(key, args.cookie_secure, SameSite::Lax, args.bind, pool)
        .with_finalise_policy(args.finalise_policy);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
