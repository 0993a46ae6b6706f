//! JSON record of a generated batch.

use crate::error::{CliError, CliResult};
use mutiny_analyzer::{Occurrence, SiteCounts};
use mutiny_mutation::{Mutant, MutationPlan};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Everything needed to trace a mutant file back to its plan.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub seed: u64,
    pub source: PathBuf,
    pub total_sites: usize,
    pub num_calls: usize,
    pub mutants: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub plan: MutationPlan,
    /// Written file, or `None` if writing it failed.
    pub file: Option<PathBuf>,
    /// Rewrites performed, in traversal order.
    pub applied: Vec<Occurrence>,
}

impl Manifest {
    pub fn new(seed: u64, source: &Path, counts: &SiteCounts) -> Self {
        Self {
            seed,
            source: source.to_path_buf(),
            total_sites: counts.count(),
            num_calls: counts.num_calls(),
            mutants: Vec::new(),
        }
    }

    pub fn record(&mut self, mutant: &Mutant, file: Option<PathBuf>) {
        self.mutants.push(ManifestEntry {
            plan: mutant.plan.clone(),
            file,
            applied: mutant.applied.clone(),
        });
    }

    /// Write the manifest as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> CliResult<()> {
        let file = File::create(path).map_err(|e| CliError::write(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| CliError::manifest(path, e))
    }
}
