use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod models;
mod repositories;
pub mod services;
pub mod settings;

#[derive(Parser)]
#[command(name = "ira-portal", about = "Self-directed Bitcoin IRA backend")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Path to the log4rs configuration file.
    #[arg(long, default_value = "log4rs.yaml")]
    log_config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
}

fn init_logging(path: &str) -> Result<(), anyhow::Error> {
    if !Path::new("logs").exists() {
        fs::create_dir("logs")?;
    }

    match log4rs::init_file(path, Default::default()) {
        Ok(_) => {
            println!("[*] Logging initialized successfully.");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to load log4rs config: {}", e)),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_config)?;

    let config = settings::Settings::new(&args.config)?;

    // Lazy pool: the process starts even when the database is down and
    // requests degrade to 503 until it comes back.
    let pool = PgPoolOptions::new()
        .max_connections(config.postgres.max_connections)
        .acquire_timeout(Duration::from_secs(config.postgres.connect_timeout_secs))
        .connect_lazy(&config.postgres.url)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            println!("[*] Applying migrations.");
            sqlx::migrate!("./migrations").run(&pool).await?;
            log::info!("Migrations applied.");
        }
        Command::Serve => {
            println!("[*] Starting services.");
            let channels = services::start_services(pool.clone(), &config).await?;
            let state = services::http::AppState::new(channels, config);

            services::http::serve(state).await?;
        }
    }

    pool.close().await;
    Ok(())
}
