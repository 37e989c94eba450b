//! Sitebrief CLI
//!
//! Main entry point for the sitebrief command-line tool.
//! Turns a website brief file into a prompt for a website-builder AI, with AI
//! assistance for filling in the brief.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AnalyzeCommand, AssembleCommand, ContentCommand, GenerateCommand, InspireCommand,
    KeywordsCommand, LogoCommand, PaletteCommand,
};
use sitebrief_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Sitebrief - website briefs into website-builder prompts
#[derive(Parser, Debug)]
#[command(name = "sitebrief")]
#[command(about = "Build prompts for website-builder AIs from a structured brief", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "SITEBRIEF_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "SITEBRIEF_CONFIG")]
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

    /// LLM provider (gemini, ollama, mock)
    #[arg(short, long, global = true, env = "SITEBRIEF_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "SITEBRIEF_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the prompt document for a brief (no AI call)
    Assemble(AssembleCommand),

    /// Stream the AI-polished website prompt
    Generate(GenerateCommand),

    /// Analyze an existing website and extract a brief
    Analyze(AnalyzeCommand),

    /// Generate a color palette
    Palette(PaletteCommand),

    /// Generate SEO keywords
    Keywords(KeywordsCommand),

    /// Suggest values for a text field
    Inspire(InspireCommand),

    /// Draft copy for a page
    Content(ContentCommand),

    /// Generate a logo suggestion
    Logo(LogoCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration; the workspace and config flags pick the YAML file
    let config = AppConfig::load_with(cli.workspace, cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Sitebrief CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Assemble(_) => "assemble",
        Commands::Generate(_) => "generate",
        Commands::Analyze(_) => "analyze",
        Commands::Palette(_) => "palette",
        Commands::Keywords(_) => "keywords",
        Commands::Inspire(_) => "inspire",
        Commands::Content(_) => "content",
        Commands::Logo(_) => "logo",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Assemble(cmd) => cmd.execute(&config),
        Commands::Generate(cmd) => cmd.execute(&config).await,
        Commands::Analyze(cmd) => cmd.execute(&config).await,
        Commands::Palette(cmd) => cmd.execute(&config).await,
        Commands::Keywords(cmd) => cmd.execute(&config).await,
        Commands::Inspire(cmd) => cmd.execute(&config).await,
        Commands::Content(cmd) => cmd.execute(&config).await,
        Commands::Logo(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
