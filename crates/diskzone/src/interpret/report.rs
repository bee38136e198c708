use std::fmt;

use super::{Category, ClassificationResult};

/// Ordered classification results for one run.
///
/// `Display` renders the operator-facing summary block.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ClassificationReport {
    results: Vec<ClassificationResult>,
}

impl ClassificationReport {
    pub fn push(&mut self, result: ClassificationResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationResult> {
        self.results.iter()
    }

    pub fn results(&self) -> &[ClassificationResult] {
        &self.results
    }

    /// Number of results in `category`.
    pub fn count(&self, category: Category) -> usize {
        self.results
            .iter()
            .filter(|r| r.category() == category)
            .count()
    }

    /// One summary line for a single result.
    pub fn format_line(result: &ClassificationResult) -> String {
        match result.breakpoint() {
            Some(bp) => format!(
                "{:<30} : {} (Zone = {:.1} mm)",
                bp.name,
                result.category(),
                result.measurement().diameter_mm()
            ),
            None => format!("Zone #{}: Skipped", result.zone()),
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Final Results ===")?;
        for result in &self.results {
            writeln!(f, "{}", Self::format_line(result))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ClassificationReport {
    type Item = &'a ClassificationResult;
    type IntoIter = std::slice::Iter<'a, ClassificationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
