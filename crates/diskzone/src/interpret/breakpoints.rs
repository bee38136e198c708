//! Antibiotic breakpoint reference table.
//!
//! Table JSON uses a small versioned schema (`diskzone.breakpoints.v1`):
//!
//! ```json
//! {
//!   "schema": "diskzone.breakpoints.v1",
//!   "entries": [
//!     { "name": "Ampicillin", "susceptible_mm": 17, "resistant_mm": 13 }
//!   ]
//! }
//! ```

use std::path::Path;

use super::Category;
use crate::config::ConfigError;

const BREAKPOINTS_SCHEMA_V1: &str = "diskzone.breakpoints.v1";

/// Default table capacity.
pub const DEFAULT_TABLE_CAPACITY: usize = 50;

const DEFAULT_ENTRIES: [(&str, f32, f32); 7] = [
    ("Ampicillin", 17.0, 13.0),
    ("Ciprofloxacin", 25.0, 22.0),
    ("Gentamicin", 15.0, 12.0),
    ("Tetracycline", 19.0, 14.0),
    ("Cefotaxime", 26.0, 22.0),
    ("Meropenem", 25.0, 22.0),
    ("Trimethoprim-Sulfamethoxazole", 16.0, 10.0),
];

/// Zone-diameter breakpoints for one antibiotic.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AntibioticBreakpoint {
    /// Antibiotic name; unique key, matched case-sensitively.
    pub name: String,
    /// Diameters at or above this value (mm) are Susceptible.
    pub susceptible_mm: f32,
    /// Diameters at or below this value (mm) are Resistant.
    pub resistant_mm: f32,
}

impl AntibioticBreakpoint {
    pub fn new(name: impl Into<String>, susceptible_mm: f32, resistant_mm: f32) -> Self {
        Self {
            name: name.into(),
            susceptible_mm,
            resistant_mm,
        }
    }

    /// Classify a zone diameter (mm) against these breakpoints.
    ///
    /// The susceptible bound is tested first, so with inverted breakpoints
    /// (`susceptible_mm <= resistant_mm`) an overlapping diameter is Susceptible.
    /// Both bounds are inclusive. Never returns [`Category::Unresolved`].
    pub fn classify(&self, diameter_mm: f32) -> Category {
        if diameter_mm >= self.susceptible_mm {
            Category::Susceptible
        } else if diameter_mm <= self.resistant_mm {
            Category::Resistant
        } else {
            Category::Intermediate
        }
    }

    /// `true` when the susceptible bound lies above the resistant bound.
    pub fn is_ordered(&self) -> bool {
        self.susceptible_mm > self.resistant_mm
    }
}

/// Owned, capacity-bounded set of breakpoints with unique names.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    entries: Vec<AntibioticBreakpoint>,
    capacity: usize,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct BreakpointTableSpecV1 {
    schema: String,
    entries: Vec<AntibioticBreakpoint>,
}

impl BreakpointTable {
    /// Empty table holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Build a table from entries, validating names, values and capacity.
    pub fn from_entries(
        entries: Vec<AntibioticBreakpoint>,
        capacity: usize,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::with_capacity(capacity);
        for entry in entries {
            table.insert(entry)?;
        }
        Ok(table)
    }

    /// Add one entry. Fails on a duplicate name, a non-finite threshold or a full table.
    pub fn insert(&mut self, entry: AntibioticBreakpoint) -> Result<(), ConfigError> {
        if entry.name.trim().is_empty() {
            return Err(ConfigError::new("antibiotic name must not be empty"));
        }
        if !entry.susceptible_mm.is_finite() || !entry.resistant_mm.is_finite() {
            return Err(ConfigError::new(format!(
                "breakpoints for '{}' must be finite",
                entry.name
            )));
        }
        if self.lookup(&entry.name).is_some() {
            return Err(ConfigError::new(format!(
                "duplicate antibiotic '{}'",
                entry.name
            )));
        }
        if self.entries.len() >= self.capacity {
            return Err(ConfigError::new(format!(
                "breakpoint table is full ({} entries)",
                self.capacity
            )));
        }
        if !entry.is_ordered() {
            tracing::warn!(
                "'{}': susceptible breakpoint {} is not above resistant breakpoint {}",
                entry.name,
                entry.susceptible_mm,
                entry.resistant_mm
            );
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Exact, case-sensitive lookup by name.
    pub fn lookup(&self, name: &str) -> Option<&AntibioticBreakpoint> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &AntibioticBreakpoint> + '_ {
        self.entries.iter()
    }

    /// Built-in reference table with the given capacity.
    pub fn builtin(capacity: usize) -> Result<Self, ConfigError> {
        let entries = DEFAULT_ENTRIES
            .iter()
            .map(|&(name, s, r)| AntibioticBreakpoint::new(name, s, r))
            .collect();
        Self::from_entries(entries, capacity)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: &Path, capacity: usize) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&data, capacity)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e)))
    }

    /// Parse a table from JSON text.
    pub fn from_json_str(data: &str, capacity: usize) -> Result<Self, ConfigError> {
        let spec: BreakpointTableSpecV1 = serde_json::from_str(data)
            .map_err(|e| ConfigError::new(format!("invalid breakpoint table: {}", e)))?;
        if spec.schema != BREAKPOINTS_SCHEMA_V1 {
            return Err(ConfigError::new(format!(
                "unsupported breakpoint schema '{}' (expected '{}')",
                spec.schema, BREAKPOINTS_SCHEMA_V1
            )));
        }
        Self::from_entries(spec.entries, capacity)
    }

    /// Serialize the table using the versioned schema.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&BreakpointTableSpecV1 {
            schema: BREAKPOINTS_SCHEMA_V1.to_string(),
            entries: self.entries.clone(),
        })
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::builtin(DEFAULT_TABLE_CAPACITY).expect("builtin breakpoint table must be valid")
    }
}
