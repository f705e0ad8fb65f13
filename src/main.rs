use clap::Parser;
use file_audit::cli::{Cli, run_cli};
use file_audit::output::OutputFormatter;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    // Flags are validated before anything touches the filesystem
    let config = Cli::parse().into();

    if let Err(e) = run_cli(config) {
        OutputFormatter::error(&format!("Error: {}", e));
        process::exit(1);
    }
}
