//! CLI administration tool for link-allocator.
//!
//! Inspects stored mappings and the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Mapping count and current identifier length
//! cargo run --bin admin -- stats
//!
//! # Look up a short identifier
//! cargo run --bin admin -- resolve aB3
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string
//! - `MIN_ID_LENGTH`, `MAX_FILL_RATIO`: identifier policy used by `stats`

use link_allocator::config::{self, Config, mask_connection_string};
use link_allocator::domain::length_policy::{CHARSET_SIZE, capacity, compute_length};
use link_allocator::domain::repositories::MappingRepository;
use link_allocator::infrastructure::persistence::PgMappingRepository;
use link_allocator::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting link-allocator storage.
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
    /// Show mapping count and identifier sizing
    Stats,

    /// Print the URL stored for a short identifier
    Resolve {
        /// Short identifier (the part after `/r/`)
        id: String,
    },

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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config.database_url.clone().context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, &database_url).await?;

    match cli.command {
        Commands::Stats => handle_stats(&config, &pool).await?,
        Commands::Resolve { id } => handle_resolve(&pool, &id).await?,
        Commands::Db { action } => handle_db_action(action, &config, &pool).await?,
    }

    Ok(())
}

/// Displays the mapping count and how it drives identifier length.
async fn handle_stats(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgMappingRepository::new(Arc::new(pool.clone()));
    let count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let length = compute_length(count, config.min_id_length, config.max_fill_ratio);
    let space = capacity(length);
    let usable = (space as f64 * config.max_fill_ratio).floor();

    println!(
        "  Mappings:          {}",
        count.to_string().bright_green().bold()
    );
    println!(
        "  Identifier length: {}",
        length.to_string().bright_green().bold()
    );
    println!(
        "  Identifier space:  {} ({}^{})",
        space.to_string().bright_white(),
        CHARSET_SIZE,
        length
    );
    println!(
        "  Fill:              {:.4}% of {:.0} usable (max ratio {})",
        count as f64 / space as f64 * 100.0,
        usable,
        config.max_fill_ratio
    );
    println!();

    Ok(())
}

/// Looks up a single identifier.
async fn handle_resolve(pool: &PgPool, id: &str) -> Result<()> {
    let repo = PgMappingRepository::new(Arc::new(pool.clone()));

    let mapping = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match mapping {
        Some(mapping) => {
            println!("  ID:      {}", mapping.id.cyan());
            println!("  URL:     {}", mapping.url.bright_white());
            println!("  Created: {}", mapping.created.to_rfc3339().bright_black());
        }
        None => {
            println!("{}", format!("❌ No mapping for '{}'", id).red());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()").fetch_one(pool).await?;

            let table_size: String = sqlx::query_scalar(
                "SELECT pg_size_pretty(pg_total_relation_size('mappings'))",
            )
            .fetch_one(pool)
            .await?;

            if let Some(ref url) = config.database_url {
                println!("  Connection: {}", mask_connection_string(url).bright_black());
            }
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  mappings:   {}", table_size.bright_white());
            println!();
        }
    }

    Ok(())
}
