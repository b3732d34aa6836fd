//! Backend entry-point: configuration, migrations, and HTTP bootstrap.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{create_server, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// `backend` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "backend",
    about = "Freelance-marketplace HTTP backend",
    version
)]
struct CliArgs {
    /// Socket address to bind.
    #[arg(long = "bind-addr", value_name = "addr", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted;
    /// without either the server runs over in-memory storage.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Maximum connections held by the database pool.
    #[arg(long = "pool-max", value_name = "n", default_value_t = 10)]
    pool_max: u32,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(std::io::Error::other)?;
    let database_url = args.database_url.or_else(|| env::var("DATABASE_URL").ok());

    let mut config = ServerConfig::new(args.bind_addr);
    match database_url {
        Some(url) => {
            apply_migrations(&url)?;
            let pool = DbPool::new(PoolConfig::new(&url).with_max_size(args.pool_max))
                .await
                .map_err(|error| {
                    std::io::Error::other(format!("create database pool: {error}"))
                })?;
            config = config.with_db_pool(pool);
            info!("running over PostgreSQL storage");
        }
        None => {
            warn!("no database configured; running over in-memory storage");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %args.bind_addr, "listening");
    server.await
}

/// Apply pending embedded migrations over a one-off sync connection.
fn apply_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|error| std::io::Error::other(format!("connect for migrations: {error}")))?;
    connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| std::io::Error::other(format!("run migrations: {error}")))?;
    Ok(())
}
