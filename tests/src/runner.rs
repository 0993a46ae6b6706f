//! Scenario runner.

use mutiny_analyzer::Analyzer;
use mutiny_mutation::{MutationPlan, Mutator};
use mutiny_parser::{parse_module, render_module};

use crate::error::{ExampleError, ExampleResult};
use crate::scenario::Scenario;

/// Runs a scenario's steps against one parsed source.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    pub fn run(&self) -> ExampleResult<()> {
        let name = self.scenario.name();

        // 1. Parse and analyze the source
        let source = self
            .scenario
            .source_text()
            .ok_or_else(|| ExampleError::missing_source(name))?;
        let module = parse_module(source).map_err(|e| ExampleError::parse(name, e.to_string()))?;
        let counts = Analyzer::analyze(&module);

        if let Some(expected) = self.scenario.expected_sites() {
            if counts.count() != expected {
                return Err(ExampleError::site_count(name, expected, counts.count()));
            }
        }
        if let Some(expected) = self.scenario.expected_calls() {
            if counts.num_calls() != expected {
                return Err(ExampleError::assertion_failed(
                    name,
                    format!("expected {} calls, found {}", expected, counts.num_calls()),
                ));
            }
        }

        // 2. Apply each step to a fresh copy and verify it
        let original = render_module(&module);
        for (i, step) in self.scenario.steps().iter().enumerate() {
            let plan = MutationPlan::from_occurrences(i, step.targets.iter().copied());
            let result = Mutator::mutate_checked(&module, &counts, &plan).map_err(|e| e.to_string());
            step.assertion.verify(&step.name, &original, &result)?;
        }

        // Steps never touch the parsed tree
        if render_module(&module) != original {
            return Err(ExampleError::assertion_failed(
                name,
                "source tree changed while mutating",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutiny_analyzer::{Category, Occurrence};

    #[test]
    fn test_runner_reports_site_mismatch() {
        let scenario = Scenario::new("mismatch").source("x = a + b\n").sites(3);
        let err = Runner::new(&scenario).run().unwrap_err();
        assert!(matches!(err, ExampleError::SiteCount { actual: 1, .. }));
    }

    #[test]
    fn test_runner_requires_source() {
        let scenario = Scenario::new("empty");
        assert!(matches!(
            Runner::new(&scenario).run(),
            Err(ExampleError::MissingSource { .. })
        ));
    }

    #[test]
    fn test_runner_applies_steps() {
        let scenario = Scenario::new("single")
            .source("x = a + b\n")
            .step("add", [Occurrence::new(Category::Add, 0)], |a| {
                a.renders("x = a - b\n").applied(1)
            });
        Runner::new(&scenario).run().unwrap();
    }
}
