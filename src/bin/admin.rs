//! CLI administration tool for linkwatch.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Apply the schema
//! cargo run --bin admin -- migrate
//!
//! # Create a short link (prompts for the URL when --url is omitted)
//! cargo run --bin admin -- create --url https://example.com/some/long/path
//!
//! # Show click statistics for a code
//! cargo run --bin admin -- stats --code aB3xK9
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL`, `BASE_URL`,
//! `SHORT_CODE_LENGTH`, ...), see [`linkwatch::config`].

use linkwatch::application::services::LinkService;
use linkwatch::config::{self, Config};
use linkwatch::infrastructure::persistence::{
    self, SqliteClickRepository, SqliteLinkRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing linkwatch.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,

    /// Create a short link
    Create {
        /// Long URL to shorten
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show click statistics for a short link
    Stats {
        /// Short code to look up
        #[arg(short, long)]
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = persistence::connect(&config.database_url, 1)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::Migrate => migrate(&pool).await,
        Commands::Create { url } => create_link(&pool, &config, url).await,
        Commands::Stats { code } => show_stats(&pool, &config, &code).await,
    };

    pool.close().await;

    result
}

type CliLinkService = LinkService<SqliteLinkRepository, SqliteClickRepository>;

fn link_service(pool: &SqlitePool, config: &Config) -> CliLinkService {
    let pool = Arc::new(pool.clone());

    LinkService::new(
        Arc::new(SqliteLinkRepository::new(pool.clone())),
        Arc::new(SqliteClickRepository::new(pool)),
        config.base_url.clone(),
    )
    .with_code_length(config.short_code_length)
}

async fn migrate(pool: &SqlitePool) -> Result<()> {
    persistence::run_migrations(pool)
        .await
        .context("Failed to run migrations")?;

    println!("{}", "Migrations applied".green().bold());
    Ok(())
}

async fn create_link(pool: &SqlitePool, config: &Config, url: Option<String>) -> Result<()> {
    let long_url = match url {
        Some(url) => url,
        None => Input::new()
            .with_prompt("Long URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let service = link_service(pool, config);

    let link = service
        .create_link(&long_url)
        .await
        .context("Failed to create link")?;

    println!("{}", "Short link created".green().bold());
    println!("  Code:      {}", link.short_code.bright_yellow().bold());
    println!("  Long URL:  {}", link.long_url.cyan());
    println!("  Short URL: {}", service.short_url(&link.short_code).bright_cyan());

    Ok(())
}

async fn show_stats(pool: &SqlitePool, config: &Config, code: &str) -> Result<()> {
    let service = link_service(pool, config);

    let stats = match service.get_stats(code).await {
        Ok(stats) => stats,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("Short code '{code}' not found");
        }
        Err(e) => return Err(e).context("Failed to load statistics"),
    };

    println!("{}", "Link statistics".bright_blue().bold());
    println!("  Code:         {}", stats.link.short_code.bright_yellow());
    println!("  Long URL:     {}", stats.link.long_url.cyan());
    println!(
        "  Created:      {}",
        stats.link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Total clicks: {}",
        stats.total_clicks.to_string().bright_white().bold()
    );

    Ok(())
}
