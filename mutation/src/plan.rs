//! Mutation plans.

use crate::{MutationError, MutationResult};
use mutiny_analyzer::{Category, Occurrence, SiteCounts};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// The occurrences to rewrite in one mutant, grouped by category.
///
/// Only populated categories are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationPlan {
    /// Ordinal of the mutant this plan is for.
    pub mutant: usize,
    targets: BTreeMap<Category, BTreeSet<usize>>,
}

impl MutationPlan {
    pub fn new(mutant: usize) -> Self {
        Self {
            mutant,
            targets: BTreeMap::new(),
        }
    }

    /// Build a plan from explicit occurrences.
    pub fn from_occurrences(
        mutant: usize,
        occurrences: impl IntoIterator<Item = Occurrence>,
    ) -> Self {
        let mut plan = Self::new(mutant);
        for occurrence in occurrences {
            plan.insert(occurrence);
        }
        plan
    }

    pub fn insert(&mut self, occurrence: Occurrence) {
        self.targets
            .entry(occurrence.category)
            .or_default()
            .insert(occurrence.ordinal);
    }

    /// Replace a category's targets with a single ordinal.
    pub fn replace(&mut self, category: Category, ordinal: usize) {
        self.targets.insert(category, BTreeSet::from([ordinal]));
    }

    pub fn contains(&self, occurrence: Occurrence) -> bool {
        self.targets
            .get(&occurrence.category)
            .is_some_and(|ordinals| ordinals.contains(&occurrence.ordinal))
    }

    pub fn targets(&self, category: Category) -> Option<&BTreeSet<usize>> {
        self.targets.get(&category)
    }

    /// Every targeted occurrence, in category then ordinal order.
    pub fn occurrences(&self) -> impl Iterator<Item = Occurrence> + '_ {
        self.targets.iter().flat_map(|(&category, ordinals)| {
            ordinals
                .iter()
                .map(move |&ordinal| Occurrence::new(category, ordinal))
        })
    }

    /// Total number of targeted occurrences.
    pub fn len(&self) -> usize {
        self.targets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Check every target names an occurrence that exists. Call ordinals
    /// range over all calls, not the single call site.
    pub fn validate(&self, counts: &SiteCounts) -> MutationResult<()> {
        for occurrence in self.occurrences() {
            let available = match occurrence.category {
                Category::Call => counts.num_calls(),
                category => counts.get(category),
            };
            if occurrence.ordinal >= available {
                return Err(MutationError::invalid_plan(
                    occurrence.category,
                    occurrence.ordinal,
                    available,
                ));
            }
        }
        Ok(())
    }
}
