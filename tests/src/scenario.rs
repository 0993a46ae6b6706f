//! Scenario builder.

use mutiny_analyzer::Occurrence;

use crate::assertion::Assertion;
use crate::error::ExampleResult;
use crate::runner::Runner;

/// One planned mutant and what it must look like.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub targets: Vec<Occurrence>,
    pub assertion: Assertion,
}

/// A source program plus a sequence of hand-written plans against it.
#[derive(Debug, Default)]
pub struct Scenario {
    name: String,
    source: Option<String>,
    sites: Option<usize>,
    num_calls: Option<usize>,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Expect this many sites in the flat index space.
    pub fn sites(mut self, n: usize) -> Self {
        self.sites = Some(n);
        self
    }

    /// Expect this many call expressions.
    pub fn calls(mut self, n: usize) -> Self {
        self.num_calls = Some(n);
        self
    }

    /// Add a step mutating `targets` and checking the result.
    pub fn step<F>(
        mut self,
        name: &str,
        targets: impl IntoIterator<Item = Occurrence>,
        f: F,
    ) -> Self
    where
        F: FnOnce(Assertion) -> Assertion,
    {
        self.steps.push(Step {
            name: name.to_string(),
            targets: targets.into_iter().collect(),
            assertion: f(Assertion::new()),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_text(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn expected_sites(&self) -> Option<usize> {
        self.sites
    }

    pub fn expected_calls(&self) -> Option<usize> {
        self.num_calls
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn run(&self) -> ExampleResult<()> {
        Runner::new(self).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutiny_analyzer::Category;

    #[test]
    fn test_builder_collects_steps() {
        let scenario = Scenario::new("builder")
            .source("x = a + b\n")
            .sites(1)
            .step("add", [Occurrence::new(Category::Add, 0)], |a| a.applied(1))
            .step("none", Vec::new(), |a| a.lines_changed(0));

        assert_eq!(scenario.name(), "builder");
        assert_eq!(scenario.expected_sites(), Some(1));
        assert_eq!(scenario.steps().len(), 2);
        assert_eq!(scenario.steps()[0].targets.len(), 1);
    }
}
