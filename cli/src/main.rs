//! Mutiny - seeded mutant generator for Python sources.
//!
//! This is the entry point for the `mutiny` binary.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mutiny_cli::{run, Cli, Outcome};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(Outcome::Report(report)) => println!("{}", report),
        Ok(Outcome::Generated { .. }) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
