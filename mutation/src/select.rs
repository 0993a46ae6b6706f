//! Selection of the sites each mutant rewrites.
//!
//! Random draws for one mutant are taken in a fixed order: the count roll,
//! the optional count range draw, the distinct index sample, then the
//! optional call ordinal. Planning mutants in ordinal order from one seeded
//! source therefore reproduces the same batch.

use crate::{MutationError, MutationPlan, MutationResult};
use mutiny_analyzer::{Category, Occurrence, SiteCounts};
use rand::seq::index;
use rand::Rng;

/// Decide how many sites one mutant rewrites.
///
/// A uniform roll over `0..=4` gives 1 site for 0-2, 2 sites for 3, and a
/// uniform count in `3..=total` for 4. The roll is always consumed, even
/// when fewer than two sites exist and the answer is forced to 1.
pub fn choose_count<R: Rng + ?Sized>(total: usize, rng: &mut R) -> usize {
    let roll = rng.gen_range(0..5);
    if total < 2 {
        return 1;
    }
    match roll {
        0..=2 => 1,
        3 => 2,
        // 3..=2 is empty; cap at everything there is
        _ if total < 3 => total,
        _ => rng.gen_range(3..=total),
    }
}

/// Map a flat site index to its category and local ordinal.
///
/// Returns `None` when `flat` is past the last site.
pub fn decompose(counts: &SiteCounts, flat: usize) -> Option<Occurrence> {
    let mut rest = flat;
    for category in Category::ALL {
        let n = counts.get(category);
        if rest < n {
            return Some(Occurrence::new(category, rest));
        }
        rest -= n;
    }
    None
}

/// Plan one mutant.
pub fn plan<R: Rng + ?Sized>(
    counts: &SiteCounts,
    mutant: usize,
    rng: &mut R,
) -> MutationResult<MutationPlan> {
    if counts.is_empty() {
        return Err(MutationError::NoSites);
    }
    Ok(draw(counts, mutant, rng))
}

/// Plan one mutant for counts known to hold at least one site.
pub(crate) fn draw<R: Rng + ?Sized>(counts: &SiteCounts, mutant: usize, rng: &mut R) -> MutationPlan {
    let total = counts.count();
    let amount = choose_count(total, rng);

    let mut plan = MutationPlan::new(mutant);
    for flat in index::sample(rng, total, amount) {
        if let Some(occurrence) = decompose(counts, flat) {
            plan.insert(occurrence);
        }
    }

    // The call category is one flat site standing for every call; pick
    // which call it means.
    if plan.targets(Category::Call).is_some() {
        let ordinal = rng.gen_range(0..counts.num_calls());
        plan.replace(Category::Call, ordinal);
    }

    plan
}
