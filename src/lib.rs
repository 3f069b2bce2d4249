pub mod bindings;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod compose;
pub mod events;
pub mod render;
pub mod seed;
pub mod session;
pub mod state;
pub mod types;
pub mod watcher;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging with tracing.
/// Respects RUST_LOG env var; defaults to `info` level for the agentdeck crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agentdeck=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    // .env in the working directory may carry RUST_LOG and AGENTDECK_* overrides
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = cli::Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(cli::execute(cli))
}
