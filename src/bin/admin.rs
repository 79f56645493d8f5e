//! CLI administration tool for url-shortener.
//!
//! Inspects stored mappings and visits and runs database maintenance
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all short links, newest first
//! cargo run --bin admin -- urls
//!
//! # Show a link and its visit count
//! cargo run --bin admin -- visits aB3dE9z
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use url_shortener::config::Config;
use url_shortener::domain::repositories::{UrlRepository, VisitRepository};
use url_shortener::infrastructure::persistence::{PgUrlRepository, PgVisitRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// List all short links
    Urls {
        /// Show at most this many links
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a short link and how often it was visited
    Visits {
        /// Short code to inspect
        code: String,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Urls { limit } => list_urls(pool, limit).await?,
        Commands::Visits { code } => show_visits(pool, &code).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn list_urls(pool: Arc<PgPool>, limit: Option<usize>) -> Result<()> {
    let repo = PgUrlRepository::new(pool);
    let urls = repo.list_all().await?;

    if urls.is_empty() {
        println!("{}", "No short links yet".yellow());
        return Ok(());
    }

    println!("{}", "🔗 Short links".bright_blue().bold());
    println!();

    let shown = limit.unwrap_or(urls.len());
    for url in urls.iter().take(shown) {
        println!(
            "  {}  {}  {}",
            url.short_code.bright_green().bold(),
            url.created_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed(),
            url.original_url
        );
    }

    if shown < urls.len() {
        println!();
        println!("  ... and {} more", urls.len() - shown);
    }
    println!();

    Ok(())
}

async fn show_visits(pool: Arc<PgPool>, code: &str) -> Result<()> {
    let url_repo = PgUrlRepository::new(pool.clone());
    let visit_repo = PgVisitRepository::new(pool);

    let Some(original_url) = url_repo.find_url(code).await? else {
        println!("{} {}", "❌ Short link not found:".red().bold(), code);
        return Ok(());
    };

    let visits = visit_repo.count_by_code(code).await?;

    println!("  Code:   {}", code.bright_green().bold());
    println!("  URL:    {}", original_url);
    println!("  Visits: {}", visits.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_stats(pool: Arc<PgPool>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = PgUrlRepository::new(pool.clone()).count().await?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_visits")
        .fetch_one(pool.as_ref())
        .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits: {}",
        visits_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🔧 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
