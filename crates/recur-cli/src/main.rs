mod config;
mod repl;
mod server;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recur_core::{HOW_IT_WORKS, RECURRENCE, Session, depth};
use rmcp::{ServiceExt, transport::stdio};

use crate::config::{Config, load_config};

#[derive(Parser)]
#[command(
    name = "recur",
    about = "Substitution-method expansion of T(n) = 2T(n/2) + O(n)"
)]
struct Cli {
    /// Config file (defaults to $RECUR_CONFIG, then ~/.config/recur/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand T(n) for the given input
    Solve {
        /// Value of n, as typed (must be a positive integer)
        #[arg(allow_hyphen_values = true)]
        input: String,

        /// Print the session record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive solve/reset loop over stdin
    Session,

    /// Start MCP server on stdio transport
    Serve,

    /// Explain what the solver does
    About,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref()).context("failed to load config")?;

    match &cli.command {
        Commands::Solve { input, json } => cmd_solve(&config, input, *json),
        Commands::Session => cmd_session(&config).map(|()| ExitCode::SUCCESS),
        Commands::Serve => run_serve(&config).map(|()| ExitCode::SUCCESS),
        Commands::About => cmd_about().map(|()| ExitCode::SUCCESS),
    }
}

/// Exits 1 when the input is rejected.
fn cmd_solve(config: &Config, input: &str, json: bool) -> Result<ExitCode> {
    let (session, outcome) = Session::new().edit(input).try_solve();

    match &outcome {
        Ok(size) => tracing::debug!(steps = depth(size.get()), "expanded"),
        Err(e) => tracing::debug!(reason = e.rejection().as_str(), "input rejected"),
    }

    if json || config.output.json {
        let out =
            serde_json::to_string_pretty(&session).context("failed to serialize session")?;
        println!("{out}");
    } else if outcome.is_err() {
        eprintln!("error: {}", session.error);
    } else {
        println!("{}", session.solution);
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_session(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let prompt = stdin
        .is_terminal()
        .then_some(config.session.prompt.as_str());
    let stdout = std::io::stdout();

    let last = repl::run(stdin.lock(), stdout.lock(), prompt)?;
    tracing::debug!(input = %last.input, "session ended");
    Ok(())
}

fn run_serve(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    let result = runtime.block_on(cmd_serve(config));
    // The stdio reader sits in a blocking read that cannot be cancelled;
    // don't wait on it after a shutdown signal.
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

async fn cmd_serve(config: &Config) -> Result<()> {
    tracing::info!("starting MCP server");

    let server = server::RecurServer::new(config.server.instructions.clone());
    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            // Client went away before the handshake finished.
            tracing::info!("MCP session not established: {e}");
            return Ok(());
        }
    };

    tokio::select! {
        res = service.waiting() => {
            res.context("MCP server task failed")?;
            tracing::info!("client disconnected");
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received");
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!("failed to install SIGTERM handler: {e}");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn cmd_about() -> Result<()> {
    println!("Recurrence relation solver: {RECURRENCE}");
    println!();
    println!("How it works:");
    for (i, step) in HOW_IT_WORKS.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    Ok(())
}
