//! deptrag CLI
//!
//! Main entry point for the deptrag command-line tool.
//! Answers questions from a department's documents and manages the catalog
//! that decides which documents each department may search.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CompoundCommand, DepartmentCommand, DocumentCommand, SearchCommand};
use deptrag_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// deptrag - department-scoped document question answering
#[derive(Parser, Debug)]
#[command(name = "deptrag")]
#[command(about = "Department-scoped question answering over indexed documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DEPTRAG_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DEPTRAG_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (azure-openai, openai, ollama)
    #[arg(short, long, global = true, env = "DEPTRAG_PROVIDER")]
    provider: Option<String>,

    /// Model or deployment identifier
    #[arg(short, long, global = true, env = "DEPTRAG_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question from a department's documents
    Search(SearchCommand),

    /// Manage compounds
    Compound(CompoundCommand),

    /// Manage departments
    Department(DepartmentCommand),

    /// Manage documents and department assignments
    Document(DocumentCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Workspace and config file decide which file is merged, so they are
    // applied before loading
    let config = AppConfig::load_from(cli.workspace, cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("deptrag starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.ensure_deptrag_dir()?;

    let command_name = match &cli.command {
        Commands::Search(_) => "search",
        Commands::Compound(_) => "compound",
        Commands::Department(_) => "department",
        Commands::Document(_) => "document",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Compound(cmd) => cmd.execute(&config),
        Commands::Department(cmd) => cmd.execute(&config),
        Commands::Document(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
