//! Properties that hold for every plan over a realistic program.

use mutiny_mutation::select;
use mutiny_tests::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

const PROGRAM: &str = "\
import os
from collections import defaultdict as dd

class Counter(object):
    def __init__(self, start=0):
        self.value = start
        self.history = []

    def step(self, amount):
        self.value = self.value + amount * 2
        self.history.append(self.value)
        return self.value

def summarize(values, limit):
    total = 0
    count = 0
    for v in values:
        if v is None or v < 0:
            continue
        elif v in (1, 2, 3) and not v >= limit:
            total = total + v
        else:
            total = total - v // 3
        count = count + 1
    label = 'total: ' + str(total)
    ratio = total / count if count != 0 else 0.0
    return label, ratio, total is not None

c = Counter(5)
c.step(3)
x, y, z = summarize([1, -2, 3, None, 7], 4)
x = len(y) - 1
";

/// Every occurrence in the tree, with calls counted individually.
fn all_occurrences(counts: &SiteCounts) -> Vec<Occurrence> {
    Category::ALL
        .iter()
        .flat_map(|&category| {
            let n = if category == Category::Call {
                counts.num_calls()
            } else {
                counts.get(category)
            };
            (0..n).map(move |ordinal| Occurrence::new(category, ordinal))
        })
        .collect()
}

/// The category an operator rewrite turns `category` into.
fn swapped(category: Category) -> Option<Category> {
    match category.rewrite() {
        Rewrite::BinOp(op) => Category::of_bin_op(op),
        Rewrite::CmpOp(op) => Some(Category::of_cmp_op(op)),
        Rewrite::BoolOp(op) => Some(Category::of_bool_op(op)),
        Rewrite::NoOpStatement | Rewrite::NullLiteral => None,
    }
}

#[test]
fn test_count_is_sum_and_deterministic() {
    let module = parse(PROGRAM);

    let first = Analyzer::analyze(&module);
    let second = Analyzer::analyze(&module);

    assert_eq!(first, second);
    assert_eq!(first.count(), first.counts().iter().sum::<usize>());
    assert_eq!(first.num_calls(), 6);
    assert_eq!(first.get(Category::Call), 1);
}

#[test]
fn test_single_target_rewrites_that_occurrence_only() {
    let module = parse(PROGRAM);
    let counts = Analyzer::analyze(&module);
    let original = render_module(&module);

    let mut seen = BTreeSet::new();
    for occurrence in all_occurrences(&counts) {
        let mutant = Mutator::mutate(&module, &plan_for([occurrence]));
        assert_eq!(mutant.applied, vec![occurrence]);

        // Each occurrence yields a distinct program
        let rendered = render_module(&mutant.module);
        assert_ne!(rendered, original, "{:?}", occurrence);
        assert!(seen.insert(rendered), "{:?} duplicates another mutant", occurrence);

        // Operator swaps move exactly one occurrence between categories
        if let Some(target) = swapped(occurrence.category) {
            let after = Analyzer::analyze(&mutant.module);
            assert_eq!(after.get(occurrence.category), counts.get(occurrence.category) - 1);
            assert_eq!(after.get(target), counts.get(target) + 1);
            assert_eq!(after.count(), counts.count());
        }
    }
}

#[test]
fn test_applied_matches_plan_for_random_plans() {
    let module = parse(PROGRAM);
    let counts = Analyzer::analyze(&module);

    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = select::plan(&counts, 0, &mut rng).unwrap();
        let mutant = Mutator::mutate(&module, &plan);

        let applied: BTreeSet<Occurrence> = mutant.applied.iter().copied().collect();
        let planned: BTreeSet<Occurrence> = plan.occurrences().collect();
        assert_eq!(mutant.applied.len(), plan.len(), "seed {}", seed);
        assert_eq!(applied, planned, "seed {}", seed);
    }
}

#[test]
fn test_call_target_is_single_and_in_range() {
    let module = parse(PROGRAM);
    let counts = Analyzer::analyze(&module);
    let mut with_call = 0;

    for seed in 0..300 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = select::plan(&counts, 0, &mut rng).unwrap();
        if let Some(calls) = plan.targets(Category::Call) {
            with_call += 1;
            assert_eq!(calls.len(), 1);
            assert!(calls.iter().all(|&ordinal| ordinal < counts.num_calls()));
        }
    }

    assert!(with_call > 0);
}

#[test]
fn test_batch_counts_stay_within_bounds() {
    let module = parse(PROGRAM);
    let counts = Analyzer::analyze(&module);
    let config = MutantConfig::new().with_seed(2024).with_mutant_count(100);

    let plans = MutantGenerator::new(config).plans(&counts).unwrap();

    for plan in &plans {
        assert!(!plan.is_empty());
        assert!(plan.len() <= counts.count());
        plan.validate(&counts).unwrap();
    }
}

#[test]
fn test_string_concatenation_is_never_a_site() {
    let source = "a = 'x' + y\nb = y + \"z\"\nc = 'p' + 'q'\nd = y + z\n";
    let counts = Analyzer::analyze(&parse(source));

    assert_eq!(counts.get(Category::Add), 1);

    let rendered = mutate_source(source, [Occurrence::new(Category::Add, 0)]);
    assert_eq!(rendered, "a = 'x' + y\nb = y + 'z'\nc = 'p' + 'q'\nd = y - z\n");
}

#[test]
fn test_redundant_requires_every_name_bound_earlier() {
    let source = "\
a = 1
if a:
    b = 2
b = 3
a, b = b, a
d, a = 1, 2
a = a
";
    let counts = Analyzer::analyze(&parse(source));
    assert_eq!(counts.get(Category::RedundantAssign), 3);

    // The tuple rebinding is the second redundant assignment
    let rendered = mutate_source(source, [Occurrence::new(Category::RedundantAssign, 1)]);
    assert_eq!(
        rendered,
        "a = 1\nif a:\n    b = 2\nb = 3\n1\nd, a = 1, 2\na = a\n"
    );
}

#[test]
fn test_mutating_leaves_original_and_siblings_intact() {
    let module = parse(PROGRAM);
    let snapshot = module.clone();
    let config = MutantConfig::new().with_seed(11).with_mutant_count(20);

    let batch = MutantGenerator::new(config.clone()).generate_all(&module).unwrap();
    assert_eq!(module, snapshot);

    // Each mutant is the same as if it had been produced alone
    for mutant in &batch {
        let alone = Mutator::mutate(&snapshot, &mutant.plan);
        assert_eq!(alone.module, mutant.module);
    }

    // And a second batch from the same seed matches the first
    let again = MutantGenerator::new(config).generate_all(&module).unwrap();
    assert_eq!(batch, again);
}
