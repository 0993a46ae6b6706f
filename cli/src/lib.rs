//! Mutiny CLI
//!
//! Reads a Python source file, analyzes its mutation sites and writes
//! `0.py` through `{N-1}.py` into the output directory, one mutant each.

mod args;
mod error;
mod manifest;

pub use args::Cli;
pub use error::{CliError, CliResult};
pub use manifest::{Manifest, ManifestEntry};

use mutiny_analyzer::{Analyzer, SiteReport};
use mutiny_mutation::{MutantConfig, MutantGenerator, MutationError};
use mutiny_parser::{parse_module, render_module};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a successful run produced.
#[derive(Debug)]
pub enum Outcome {
    /// `--report`: the site breakdown, nothing written.
    Report(SiteReport),
    /// Mutant files written. A failed file is logged and skipped.
    Generated { written: Vec<PathBuf>, failed: usize },
}

/// Resolve the batch configuration: defaults, then the config file, then
/// flags.
pub fn load_config(cli: &Cli) -> CliResult<MutantConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
            MutantConfig::from_json(&text).map_err(|e| match e {
                MutationError::Config { message } => CliError::config(path, message),
                other => CliError::config(path, other.to_string()),
            })?
        }
        None => MutantConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(count) = cli.count {
        config = config.with_mutant_count(count);
    }
    Ok(config)
}

/// Run one invocation end to end.
pub fn run(cli: &Cli) -> CliResult<Outcome> {
    let config = load_config(cli)?;

    let source = fs::read_to_string(&cli.source).map_err(|e| CliError::read(&cli.source, e))?;
    let module = parse_module(&source)?;
    let counts = Analyzer::analyze(&module);

    if cli.report {
        return Ok(Outcome::Report(counts.report()));
    }

    fs::create_dir_all(&cli.output).map_err(|e| CliError::write(&cli.output, e))?;

    let seed = config.seed;
    let mut manifest = Manifest::new(seed, &cli.source, &counts);
    let mut generator = MutantGenerator::new(config);
    let mutants = generator.generate_with_counts(&module, counts)?;

    let mut written = Vec::new();
    let mut failed = 0;
    for mutant in mutants {
        let path = cli.output.join(format!("{}.py", mutant.ordinal));
        let file = match fs::write(&path, render_module(&mutant.module)) {
            Ok(()) => {
                written.push(path.clone());
                Some(path)
            }
            Err(e) => {
                warn!(mutant = mutant.ordinal, path = %path.display(), error = %e, "failed to write mutant");
                failed += 1;
                None
            }
        };
        manifest.record(&mutant, file);
    }

    if let Some(path) = &cli.manifest {
        manifest.write(path)?;
    }

    info!(written = written.len(), failed, seed, "done");
    Ok(Outcome::Generated { written, failed })
}
