//! # Phenix Server
//!
//! Website of the Phenix Ferronnerie workshop: public galleries with the
//! image carousel, a contact form with mail notification, and an
//! administration area for the gallery entries and received messages.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use phenix_config::{Config, ConfigLoad, ConfigLoader};
use phenix_core::database::{DatabaseContext, seed};
use phenix_server::{
    create_app,
    infra::startup::{build_crypto, build_state, spawn_session_cleanup},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "phenix-server")]
#[command(about = "Phenix Ferronnerie website and administration server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, env = "PHENIX_CONFIG")]
    config: Option<PathBuf>,

    /// Serve from a seeded in-memory store instead of PostgreSQL
    #[arg(long, default_value_t = false)]
    demo: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
    /// Print an Argon2 hash for the admin password using the configured pepper
    HashPassword {
        password: String,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
    /// Insert the default gallery entries and notification recipient
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
            Command::Db(DbCommand::Seed) => {
                run_db_seed(&cli.serve).await?;
                return Ok(());
            }
            Command::HashPassword { password } => {
                run_hash_password(&cli.serve, &password)?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if args.demo {
        config.site.demo = true;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

async fn connect_postgres(config: &Config) -> anyhow::Result<DatabaseContext> {
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL is not configured")?;
    DatabaseContext::connect_postgres(url, config.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let db = connect_postgres(&config).await?;
    if let Some(pg) = db.postgres() {
        pg.initialize_schema()
            .await
            .context("database migration failed")?;
    }
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_db_seed(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let db = connect_postgres(&config).await?;
    if let Some(pg) = db.postgres() {
        pg.initialize_schema()
            .await
            .context("database migration failed")?;
    }
    let report = seed::seed_database(&db)
        .await
        .context("database seeding failed")?;
    info!(
        inserted = report.inserted,
        skipped = ?report.skipped_categories,
        recipient = %report.recipient,
        "Database seeded"
    );
    Ok(())
}

fn run_hash_password(args: &ServeArgs, password: &str) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let crypto = build_crypto(&config)?;
    let hash = crypto
        .hash_password(password)
        .context("failed to hash password")?;
    println!("{hash}");
    Ok(())
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_runtime_config(&args)?);
    let state = build_state(Arc::clone(&config)).await?;
    spawn_session_cleanup(&state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        "Starting Phenix Ferronnerie website on {}:{}",
        config.server.host, config.server.port
    );
    if config.site.demo {
        info!("demo mode enabled; changes are kept in memory only");
    }

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
