//! Bowsprit CLI - Inspect PlantUML-style class diagram declarations

mod cli;
mod colorizer;

use bowsprit::core::logging::init_logging;
use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Early init so argument handling can already log; run() reinitializes
    // with the flag-derived configuration.
    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::BowspritApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
