//! Snyk bulk delete entry point.

use clap::{CommandFactory, Parser};

use bulk_delete_cli::app;
use bulk_delete_cli::cli::Cli;
use bulk_delete_cli::config;
use bulk_delete_cli::error::EXIT_USAGE;
use bulk_delete_cli::logging;

fn main() {
    config::load_env();

    let cli = Cli::parse();

    if cli.help {
        let _ = Cli::command().print_long_help();
        std::process::exit(EXIT_USAGE);
    }

    if let Err(e) = logging::init(cli.log_level(config::debug_enabled()), &cli.log_file) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }

    match app::run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            eprintln!("Error: {}", e);
            if e.shows_usage() {
                eprintln!();
                eprintln!("{}", Cli::command().render_usage());
                eprintln!("Run with --help for the full list of options.");
            }
            std::process::exit(e.exit_code());
        }
    }
}
