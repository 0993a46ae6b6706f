//! Rendered mutants stay valid source.

use mutiny_tests::prelude::*;

const PROGRAM: &str = "\
from math import floor
import sys as system

def fib(n):
    a, b = 0, 1
    while n > 0:
        a, b = b, a + b
        n -= 1
    return a

class Grid:
    def __init__(self, w, h):
        self.cells = [[0] * w] * h if w else []

    def get(self, x, y=0):
        if not (0 <= x < 10) or y in self.cells:
            return None
        elif x is not y:
            pass
        else:
            return self.cells[y][x:]
        return {'x': x, 'y': -y ** 2}

for i in range(10):
    print(fib(i) // 2, i % 3, (i + 1) * (i - 1))
assert fib(3) != 'two', 'oops'
";

#[test]
fn test_render_is_a_fixed_point() {
    let once = render_module(&parse(PROGRAM));
    let twice = render_module(&parse(&once));
    assert_eq!(once, twice);
}

#[test]
fn test_every_mutant_reparses_to_itself() {
    let module = parse(PROGRAM);
    let config = MutantConfig::new().with_seed(3).with_mutant_count(50);

    for mutant in MutantGenerator::new(config).generate_all(&module).unwrap() {
        let rendered = render_module(&mutant.module);
        let reparsed = parse_module(&rendered)
            .unwrap_or_else(|e| panic!("mutant {} does not parse: {}\n{}", mutant.ordinal, e, rendered));
        assert_eq!(render_module(&reparsed), rendered);
    }
}

#[test]
fn test_grouping_survives_operator_swaps() {
    // (i + 1) * (i - 1) keeps its parentheses when + becomes -
    let source = "v = (i + 1) * (i - 1)\n";
    let rendered = mutate_source(
        source,
        [Occurrence::new(Category::Add, 0), Occurrence::new(Category::Mult, 0)],
    );
    assert_eq!(rendered, "v = (i - 1) // (i - 1)\n");
}
