//! snaplabel CLI - Sample edge paths and replay draggable label sessions

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized by the app once flags and env vars are resolved
    let mut app = cli::SnaplabelApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
