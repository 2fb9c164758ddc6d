use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::db;
use crate::domain::Transaction;
use crate::services::generator;
use crate::use_cases::RecordTransaction;

#[derive(Parser)]
#[command(name = "txn-seeder")]
#[command(about = "Generate one synthetic transaction and store it in Postgres", long_about = None)]
pub struct Cli {
    /// Load variables from this file instead of ./.env
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Print the generated record as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Generate one transaction and insert it (default)
    Run,

    /// Generate one transaction and print it without touching the database
    Preview,

    /// Validate configuration
    Config,

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum DbCommands {
    /// Create the transactions table if it does not exist
    Init,
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<Config> {
        Config::load(self.env_file.as_deref()).context("Invalid configuration")
    }
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => handle_run(&cli.load_config()?, cli.json).await,
        Commands::Preview => {
            handle_preview(cli.json);
            Ok(())
        }
        Commands::Config => handle_config_validate(&cli.load_config()?),
        Commands::Db(DbCommands::Init) => handle_db_init(&cli.load_config()?).await,
    }
}

pub async fn handle_run(config: &Config, json: bool) -> anyhow::Result<()> {
    RecordTransaction::new(config)
        .execute(|tx| print_transaction(tx, json))
        .await
        .context("Transaction failed")?;
    Ok(())
}

pub fn handle_preview(json: bool) {
    let tx = generator::generate();
    print_transaction(&tx, json);
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  Database: {}", config.database);
    println!("  Database URL: {}", config.masked_url());

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}

pub async fn handle_db_init(config: &Config) -> anyhow::Result<()> {
    let mut conn = db::connect(config).await?;

    tracing::info!("Ensuring schema...");
    let outcome = db::ensure_schema(&mut conn).await;
    db::close(conn).await;
    outcome?;

    println!("✓ Table transactions is ready");
    Ok(())
}

fn print_transaction(tx: &Transaction, json: bool) {
    if !json {
        println!("Generated Transaction: {}", tx);
        return;
    }
    match serde_json::to_string_pretty(tx) {
        Ok(body) => println!("{}", body),
        Err(e) => tracing::warn!("Failed to serialize transaction: {}", e),
    }
}
