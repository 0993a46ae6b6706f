//! Batch mutant generation.

use crate::select;
use crate::{MutantConfig, MutationError, MutationPlan, MutationResult, Mutant, Mutator};
use mutiny_analyzer::{Analyzer, SiteCounts};
use mutiny_parser::Module;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Generates a batch of mutants from one random source.
///
/// The source is never re-seeded between mutants, so a batch is
/// reproducible from the seed alone.
pub struct MutantGenerator<R: Rng = StdRng> {
    config: MutantConfig,
    rng: R,
}

impl MutantGenerator<StdRng> {
    /// Seed a `StdRng` from `config.seed`.
    pub fn new(config: MutantConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }
}

impl<R: Rng> MutantGenerator<R> {
    /// Use a caller-supplied random source; `config.seed` is ignored.
    pub fn with_rng(config: MutantConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &MutantConfig {
        &self.config
    }

    /// Plan every mutant of the batch without building any tree.
    pub fn plans(&mut self, counts: &SiteCounts) -> MutationResult<Vec<MutationPlan>> {
        if counts.is_empty() {
            return Err(MutationError::NoSites);
        }
        Ok((0..self.config.mutant_count)
            .map(|mutant| select::draw(counts, mutant, &mut self.rng))
            .collect())
    }

    /// Analyze `module` and return an iterator producing its mutants in
    /// ordinal order. Fails up front if the module has no sites.
    pub fn generate<'a>(&'a mut self, module: &'a Module) -> MutationResult<Mutants<'a, R>> {
        let counts = Analyzer::analyze(module);
        self.generate_with_counts(module, counts)
    }

    /// Like `generate`, reusing counts from an earlier analysis of `module`.
    pub fn generate_with_counts<'a>(
        &'a mut self,
        module: &'a Module,
        counts: SiteCounts,
    ) -> MutationResult<Mutants<'a, R>> {
        if counts.is_empty() {
            return Err(MutationError::NoSites);
        }
        info!(
            mutants = self.config.mutant_count,
            total_sites = counts.count(),
            "generating mutants"
        );
        Ok(Mutants {
            module,
            counts,
            rng: &mut self.rng,
            next: 0,
            count: self.config.mutant_count,
        })
    }

    /// Generate the whole batch eagerly.
    pub fn generate_all(&mut self, module: &Module) -> MutationResult<Vec<Mutant>> {
        Ok(self.generate(module)?.collect())
    }
}

/// Lazily produced mutants. Each `next` consumes that mutant's random
/// draws, so mutants come out in ordinal order.
pub struct Mutants<'a, R: Rng> {
    module: &'a Module,
    counts: SiteCounts,
    rng: &'a mut R,
    next: usize,
    count: usize,
}

impl<R: Rng> Mutants<'_, R> {
    /// Counts the batch is planned from.
    pub fn counts(&self) -> &SiteCounts {
        &self.counts
    }
}

impl<R: Rng> Iterator for Mutants<'_, R> {
    type Item = Mutant;

    fn next(&mut self) -> Option<Mutant> {
        if self.next >= self.count {
            return None;
        }
        let ordinal = self.next;
        self.next += 1;

        let plan = select::draw(&self.counts, ordinal, &mut *self.rng);
        debug!(mutant = ordinal, targets = plan.len(), "planned mutant");
        Some(Mutator::mutate(self.module, &plan))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Mutants<'_, R> {}
