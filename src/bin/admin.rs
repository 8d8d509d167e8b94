//! CLI administration tool for urlshorts.
//!
//! Reads and maintains the store file directly, without going through the
//! HTTP API. The store is locked by whichever process opens it first, so the
//! server must be stopped while this tool runs.
//!
//! # Usage
//!
//! ```bash
//! # List every short URL
//! cargo run --bin admin -- list
//!
//! # Show one record
//! cargo run --bin admin -- show aB3xYz9Q
//!
//! # Remove a record
//! cargo run --bin admin -- delete aB3xYz9Q
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check that the store opens
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DB_PATH` (default: `shortener.db`): store file, overridden by `--db`

use urlshorts::domain::entities::UrlRecord;
use urlshorts::domain::repositories::UrlRepository;
use urlshorts::infrastructure::persistence::RedbUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing urlshorts.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store file (defaults to $DB_PATH, then shortener.db)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List all short URLs
    List,

    /// Show a single short URL
    Show {
        /// Short code
        code: String,
    },

    /// Delete a short URL
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check that the store opens and is readable
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let db_path = cli
        .db
        .or_else(|| std::env::var("DB_PATH").ok())
        .unwrap_or_else(|| "shortener.db".to_string());

    let repo = RedbUrlRepository::open(&db_path).with_context(|| {
        format!("Failed to open store at {db_path} (is the server still running?)")
    })?;

    match cli.command {
        Commands::List => list_urls(&repo).await?,
        Commands::Show { code } => show_url(&repo, &code).await?,
        Commands::Delete { code, yes } => delete_url(&repo, &code, yes).await?,
        Commands::Stats => handle_stats(&repo).await?,
        Commands::Db { action } => handle_db_action(action, &repo, &db_path).await?,
    }

    Ok(())
}

/// Prints every record as a table.
async fn list_urls(repo: &RedbUrlRepository) -> Result<()> {
    println!("{}", "🔗 Short URLs".bright_blue().bold());
    println!();

    let records = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No short URLs yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "CODE".bold(),
        "VISITS".bold(),
        "CREATED".bold(),
        "URL".bold()
    );

    for record in &records {
        println!(
            "  {:<12} {:<8} {:<18} {}",
            record.code.cyan(),
            record.visits.to_string().bright_green(),
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints one record in full.
async fn show_url(repo: &RedbUrlRepository, code: &str) -> Result<()> {
    let record = repo
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    print_record(&record);

    Ok(())
}

fn print_record(record: &UrlRecord) {
    println!("  Code:        {}", record.code.cyan());
    println!("  URL:         {}", record.original_url);
    if let Some(name) = &record.pretty_name {
        println!("  Pretty name: {}", name);
    }
    println!(
        "  Created:     {}",
        record.created_at.to_rfc3339().bright_black()
    );
    println!(
        "  Visits:      {}",
        record.visits.to_string().bright_green().bold()
    );
    println!();
}

/// Deletes a record after confirmation.
///
/// Deleting an unknown code is reported and is not an error.
async fn delete_url(repo: &RedbUrlRepository, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short URL".bright_blue().bold());
    println!();

    match repo.get(code).await {
        Ok(record) => print_record(&record),
        Err(urlshorts::AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  No short URL with code {code}").yellow());
            return Ok(());
        }
        Err(e) => anyhow::bail!("Store error: {}", e),
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = repo
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete: {}", e))?;

    if removed {
        println!("{}", "✅ Deleted".green().bold());
    } else {
        println!("{}", "⚠️  Already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays store statistics.
///
/// Shows:
/// - Number of short URLs
/// - Total visits across all of them
/// - The most visited code
async fn handle_stats(repo: &RedbUrlRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let records = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

    let total_visits: u64 = records.iter().map(|r| r.visits).sum();

    println!(
        "  Short URLs:   {}",
        records.len().to_string().bright_green().bold()
    );
    println!(
        "  Total visits: {}",
        total_visits.to_string().bright_green().bold()
    );

    if let Some(top) = records.iter().max_by_key(|r| r.visits) {
        println!(
            "  Most visited: {} ({})",
            top.code.cyan(),
            top.visits.to_string().bright_white()
        );
    }
    println!();

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction, repo: &RedbUrlRepository, path: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking store...".bright_blue());

            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Store error: {}", e))?;

            println!("  Path:    {}", path.bright_white());
            println!("  Records: {}", count.to_string().bright_white());
            println!("{}", "✅ Store OK".green().bold());
        }
    }

    Ok(())
}
