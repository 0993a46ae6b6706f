//! Scenario tests: hand-written plans against small programs.

use mutiny_tests::prelude::*;

mod assignments {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("assignments")
            .source("a = 1\nb = a + 2\nc = a + b\n")
            .sites(2)
            .step("second_add", [Occurrence::new(Category::Add, 1)], |a| {
                a.renders("a = 1\nb = a + 2\nc = a - b\n").applied(1)
            })
            .step("first_add", [Occurrence::new(Category::Add, 0)], |a| {
                a.renders("a = 1\nb = a - 2\nc = a + b\n")
            })
            .step("both_adds", [Occurrence::new(Category::Add, 0), Occurrence::new(Category::Add, 1)], |a| {
                a.lines_changed(2).applied(2)
            })
            .step("missing_add", [Occurrence::new(Category::Add, 2)], |a| a.error("only 2 exist"))
    }

    #[test]
    fn test_targeted_add_becomes_sub() {
        // GIVEN: three assignments, two of them additions

        // WHEN: each addition is targeted

        // THEN: only the targeted line changes
        scenario().run().unwrap();
    }
}

mod redundant {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("redundant")
            .source("x = 5; x = 10\n")
            .sites(1)
            .step("second_assignment", [Occurrence::new(Category::RedundantAssign, 0)], |a| {
                a.renders("x = 5\n1\n").rewrote(Category::RedundantAssign, 0)
            })
    }

    #[test]
    fn test_rebinding_becomes_constant_statement() {
        scenario().run().unwrap();
    }
}

mod classify {
    use super::*;

    const SOURCE: &str = "\
def classify(n, limit):
    if n < 0 or n > limit:
        return None
    total = 0
    total = n * 2
    while total >= limit and n != 0:
        total = total // 2 - 1
    return total in range(limit)
result = classify(4, 10)
";

    pub fn scenario() -> Scenario {
        Scenario::new("classify")
            .source(SOURCE)
            .sites(13)
            .calls(2)
            .step("swap_or", [Occurrence::new(Category::Or, 0)], |a| {
                a.contains("if n < 0 and n > limit:").lines_changed(1)
            })
            .step("swap_and", [Occurrence::new(Category::And, 0)], |a| {
                a.contains("while total >= limit or n != 0:").lines_changed(1)
            })
            .step(
                "relational",
                [Occurrence::new(Category::Lt, 0), Occurrence::new(Category::GtE, 0)],
                |a| {
                    a.contains("if n >= 0 or n > limit:")
                        .contains("while total < limit and n != 0:")
                        .lines_changed(2)
                },
            )
            .step("membership", [Occurrence::new(Category::In, 0)], |a| {
                a.contains("return total not in range(limit)")
            })
            .step(
                "arithmetic",
                [Occurrence::new(Category::FloorDiv, 0), Occurrence::new(Category::Sub, 0)],
                |a| a.contains("total = total * 2 + 1").lines_changed(1).applied(2),
            )
            .step("mult", [Occurrence::new(Category::Mult, 0)], |a| {
                a.contains("total = n // 2")
            })
            .step("first_rebinding", [Occurrence::new(Category::RedundantAssign, 0)], |a| {
                a.excludes("total = n * 2").contains("total = 0").contains("1")
            })
            .step("inner_call", [Occurrence::new(Category::Call, 0)], |a| {
                a.contains("return total in None").contains("result = classify(4, 10)")
            })
            .step("outer_call", [Occurrence::new(Category::Call, 1)], |a| {
                a.contains("result = None").lines_changed(1)
            })
            .step("no_third_call", [Occurrence::new(Category::Call, 2)], |a| {
                a.error("only 2 exist")
            })
    }

    #[test]
    fn test_every_group_rewrites_its_line() {
        scenario().run().unwrap();
    }
}

mod single_site {
    use super::*;

    #[test]
    fn test_single_site_is_chosen_by_every_mutant() {
        // GIVEN: one mutation site
        let module = parse("ok = left == right\n");
        let config = MutantConfig::new().with_mutant_count(5);

        // WHEN: five mutants are generated
        let mutants = MutantGenerator::new(config).generate_all(&module).unwrap();

        // THEN: each rewrites exactly that site
        assert_eq!(mutants.len(), 5);
        for mutant in &mutants {
            assert_eq!(mutant.applied, vec![Occurrence::new(Category::Eq, 0)]);
            assert_eq!(render_module(&mutant.module), "ok = left != right\n");
        }
    }
}
