//! Breakpoint interpretation of measured zone diameters.
//!
//! Each [`Measurement`] is paired with an antibiotic name, the name is looked
//! up in a [`BreakpointTable`] and the diameter is classified. A name missing
//! from the table is not an error: the result is [`Category::Unresolved`] and
//! stays in the report.

pub(crate) mod breakpoints;
pub(crate) mod names;
pub(crate) mod report;

pub use breakpoints::{AntibioticBreakpoint, BreakpointTable, DEFAULT_TABLE_CAPACITY};
pub use names::{FixedNames, NameSource, NameSourceError, PromptedNames};
pub use report::ClassificationReport;

/// One zone diameter (mm) handed from the locator to the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Measurement {
    diameter_mm: f32,
}

impl Measurement {
    pub fn new(diameter_mm: f32) -> Self {
        Self { diameter_mm }
    }

    pub fn diameter_mm(&self) -> f32 {
        self.diameter_mm
    }
}

/// Clinical susceptibility category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Susceptible,
    Intermediate,
    Resistant,
    /// The antibiotic name was not found in the reference table.
    Unresolved,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Susceptible => "Susceptible",
            Self::Intermediate => "Intermediate",
            Self::Resistant => "Resistant",
            Self::Unresolved => "Unresolved",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A measurement together with the breakpoint it resolved to.
///
/// Built only by [`interpret`], so `category` is `Unresolved` exactly when
/// there is no breakpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ClassificationResult {
    zone: usize,
    measurement: Measurement,
    requested_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakpoint: Option<AntibioticBreakpoint>,
    category: Category,
}

impl ClassificationResult {
    /// 1-based position of the zone in detection order.
    pub fn zone(&self) -> usize {
        self.zone
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    /// Name as supplied by the operator.
    pub fn requested_name(&self) -> &str {
        &self.requested_name
    }

    /// Matched table entry, or `None` when unresolved.
    pub fn breakpoint(&self) -> Option<&AntibioticBreakpoint> {
        self.breakpoint.as_ref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_resolved(&self) -> bool {
        self.breakpoint.is_some()
    }
}

/// Classify one measurement for the named antibiotic.
pub fn interpret(
    zone: usize,
    measurement: Measurement,
    name: &str,
    table: &BreakpointTable,
) -> ClassificationResult {
    let breakpoint = table.lookup(name).cloned();
    let category = match &breakpoint {
        Some(bp) => bp.classify(measurement.diameter_mm()),
        None => {
            tracing::warn!("antibiotic '{}' not found in breakpoint table", name);
            Category::Unresolved
        }
    };
    tracing::debug!(
        zone,
        diameter_mm = measurement.diameter_mm(),
        name,
        %category,
        "classified"
    );
    ClassificationResult {
        zone,
        measurement,
        requested_name: name.to_string(),
        breakpoint,
        category,
    }
}

/// Classify measurements in order, asking `names` for one antibiotic per zone.
///
/// At most `max_measurements` are processed; any tail beyond that is logged
/// and dropped. Fails only when the name source fails.
pub fn classify_measurements(
    measurements: &[Measurement],
    names: &mut dyn NameSource,
    table: &BreakpointTable,
    max_measurements: usize,
) -> Result<ClassificationReport, NameSourceError> {
    if measurements.len() > max_measurements {
        tracing::warn!(
            "{} measurements supplied, only the first {} are classified",
            measurements.len(),
            max_measurements
        );
    }

    let mut report = ClassificationReport::default();
    for (i, &measurement) in measurements.iter().take(max_measurements).enumerate() {
        let zone = i + 1;
        let name = names.next_name(zone, measurement)?;
        let result = interpret(zone, measurement, &name, table);
        if !result.is_resolved() {
            names.notify_unresolved(&name)?;
        }
        report.push(result);
    }

    tracing::info!(
        "classified {} zones ({} unresolved)",
        report.len(),
        report.count(Category::Unresolved)
    );
    Ok(report)
}
