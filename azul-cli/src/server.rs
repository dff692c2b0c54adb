//! Server command - start the move-decision server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to azul-server crate)
//! - Level 4: argument validation

use anyhow::{Context, Result};
use clap::Args;

use azul_server::{run_server, ServerConfig};

use crate::SearchArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "3001")]
    pub port: u16,

    #[command(flatten)]
    pub search: SearchArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args, seed)?;

    tracing::info!("Starting Azul MCTS server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    validate_search(&args.search)?;

    Ok(ServerConfig {
        port: args.port,
        mcts: args.search.to_config(seed),
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 4 - VALIDATION
// ============================================================================

/// A zero budget would answer every multi-move request with an error
fn validate_search(search: &SearchArgs) -> Result<()> {
    match search.iterations {
        Some(0) => anyhow::bail!("--iterations must be at least 1"),
        None if search.learning_ms == 0 => anyhow::bail!("--learning-ms must be at least 1"),
        _ => Ok(()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
