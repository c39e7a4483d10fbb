//! vagrant-roles CLI Binary
//!
//! Command-line interface for managing the roles of a Vagrant environment.

use clap::Parser;
use std::process;
use vagrant_roles::logging::init_logging;
use vagrant_roles::tooling::cli::{Cli, CliContext};

fn main() {
    let cli = Cli::parse();

    // Create CLI context
    let context = match CliContext::new(cli.root.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing environment: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&cli.logging_config(&context.config().logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }
    tracing::debug!(root = %context.environment().root().display(), "Bound environment");

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            print!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
