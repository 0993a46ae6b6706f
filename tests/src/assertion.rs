//! Assertion types and builders for verifying mutants.

use mutiny_analyzer::{Category, Occurrence};
use mutiny_mutation::Mutant;
use mutiny_parser::render_module;

use crate::error::{ExampleError, ExampleResult};

/// Expectations on one mutant, checked against its rendered source.
#[derive(Debug, Default)]
pub struct Assertion {
    /// Exact rendered source.
    pub renders: Option<String>,
    /// Lines that must appear, trimmed of indentation.
    pub contains: Vec<String>,
    /// Lines that must not appear.
    pub excludes: Vec<String>,
    /// Number of lines differing from the unmutated rendering.
    pub lines_changed: Option<usize>,
    /// Rewrites performed by the walk.
    pub applied: Option<usize>,
    /// Occurrences that must have been rewritten.
    pub rewrote: Vec<Occurrence>,
    /// Plan validation error containing this text.
    pub error: Option<String>,
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(mut self, source: &str) -> Self {
        self.renders = Some(source.to_string());
        self
    }

    pub fn contains(mut self, line: &str) -> Self {
        self.contains.push(line.to_string());
        self
    }

    pub fn excludes(mut self, line: &str) -> Self {
        self.excludes.push(line.to_string());
        self
    }

    pub fn lines_changed(mut self, n: usize) -> Self {
        self.lines_changed = Some(n);
        self
    }

    pub fn applied(mut self, n: usize) -> Self {
        self.applied = Some(n);
        self
    }

    pub fn rewrote(mut self, category: Category, ordinal: usize) -> Self {
        self.rewrote.push(Occurrence::new(category, ordinal));
        self
    }

    pub fn error(mut self, text: &str) -> Self {
        self.error = Some(text.to_string());
        self
    }

    /// Verify the assertion against a mutant, or against the plan error
    /// that prevented one.
    pub fn verify(
        &self,
        step: &str,
        original: &str,
        result: &Result<Mutant, String>,
    ) -> ExampleResult<()> {
        if let Some(ref expected) = self.error {
            return match result {
                Err(msg) if msg.contains(expected.as_str()) => Ok(()),
                Err(msg) => Err(ExampleError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected, msg),
                )),
                Ok(_) => Err(ExampleError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected),
                )),
            };
        }

        let mutant = result
            .as_ref()
            .map_err(|msg| ExampleError::assertion_failed(step, format!("unexpected error: {}", msg)))?;
        let rendered = render_module(&mutant.module);

        if let Some(ref expected) = self.renders {
            if &rendered != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected:\n{}\ngot:\n{}", expected, rendered),
                ));
            }
        }

        for line in &self.contains {
            if !rendered.lines().any(|l| l.trim() == line) {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("missing line '{}' in:\n{}", line, rendered),
                ));
            }
        }

        for line in &self.excludes {
            if rendered.lines().any(|l| l.trim() == line) {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("unexpected line '{}' in:\n{}", line, rendered),
                ));
            }
        }

        if let Some(expected) = self.lines_changed {
            let actual = changed_lines(original, &rendered);
            if actual != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected {} changed lines, got {}", expected, actual),
                ));
            }
        }

        if let Some(expected) = self.applied {
            if mutant.applied.len() != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected {} rewrites, got {:?}", expected, mutant.applied),
                ));
            }
        }

        for occurrence in &self.rewrote {
            if !mutant.applied.contains(occurrence) {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("{:?} was not rewritten; applied {:?}", occurrence, mutant.applied),
                ));
            }
        }

        Ok(())
    }
}

/// Lines that differ position by position. Only meaningful when both
/// sides have the same line structure.
pub fn changed_lines(before: &str, after: &str) -> usize {
    let before: Vec<&str> = before.lines().collect();
    let after: Vec<&str> = after.lines().collect();
    let common = before.iter().zip(&after).filter(|(a, b)| a != b).count();
    common + before.len().abs_diff(after.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_lines() {
        assert_eq!(changed_lines("a\nb\nc\n", "a\nx\nc\n"), 1);
        assert_eq!(changed_lines("a\nb\n", "a\nb\n"), 0);
        assert_eq!(changed_lines("a\n", "a\nb\n"), 1);
    }

    #[test]
    fn test_error_expectation_fails_on_success() {
        let assertion = Assertion::new().error("only 0 exist");
        let mutant = Mutant {
            ordinal: 0,
            plan: Default::default(),
            module: Default::default(),
            applied: Vec::new(),
        };
        assert!(assertion.verify("step", "", &Ok(mutant)).is_err());
        assert!(assertion
            .verify("step", "", &Err("but only 0 exist".to_string()))
            .is_ok());
    }
}
