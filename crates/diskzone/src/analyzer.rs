//! Single-process plate analysis.
//!
//! [`Analyzer`] runs the locator and the interpreter back to back and hands
//! the measurements over in memory, so no intermediate store file is needed.

use crate::config::{ConfigError, ZoneConfig};
use crate::detector::{scan_grid, DiskSet};
use crate::grid::PixelGrid;
use crate::interpret::{
    classify_measurements, BreakpointTable, ClassificationReport, Measurement, NameSource,
    NameSourceError,
};

/// Located disks together with their classification. Output only.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlateAnalysis {
    /// Image dimensions `[width, height]`.
    pub image_size: [u32; 2],
    pub disks: DiskSet,
    pub report: ClassificationReport,
}

/// Locator + interpreter bound to one configuration and breakpoint table.
///
/// ```no_run
/// use diskzone::{Analyzer, FixedNames, PixelGrid};
/// use std::path::Path;
///
/// let grid = PixelGrid::open(Path::new("plate.png")).unwrap();
/// let analyzer = Analyzer::default();
/// let mut names = FixedNames::new(["Ampicillin", "Gentamicin"]);
/// let analysis = analyzer.analyze(&grid, &mut names).unwrap();
/// print!("{}", analysis.report);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: ZoneConfig,
    table: BreakpointTable,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            config: ZoneConfig::default(),
            table: BreakpointTable::default(),
        }
    }
}

impl Analyzer {
    /// Analyzer with the built-in breakpoint table sized from `config`.
    pub fn new(config: ZoneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = BreakpointTable::builtin(config.interpret.table_capacity)?;
        Ok(Self { config, table })
    }

    /// Analyzer with an explicit breakpoint table.
    pub fn with_table(config: ZoneConfig, table: BreakpointTable) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &ZoneConfig {
        &self.config
    }

    pub fn table(&self) -> &BreakpointTable {
        &self.table
    }

    /// Locate disks only. The config was validated on construction.
    pub fn locate(&self, grid: &PixelGrid) -> DiskSet {
        scan_grid(grid, &self.config.locate)
    }

    /// Classify already measured zones.
    pub fn classify(
        &self,
        measurements: &[Measurement],
        names: &mut dyn NameSource,
    ) -> Result<ClassificationReport, NameSourceError> {
        classify_measurements(
            measurements,
            names,
            &self.table,
            self.config.interpret.max_measurements,
        )
    }

    /// Locate, measure and classify in one pass.
    pub fn analyze(
        &self,
        grid: &PixelGrid,
        names: &mut dyn NameSource,
    ) -> Result<PlateAnalysis, NameSourceError> {
        let disks = self.locate(grid);
        let report = self.classify(&disks.measurements(), names)?;
        let (w, h) = grid.dimensions();
        Ok(PlateAnalysis {
            image_size: [w, h],
            disks,
            report,
        })
    }
}
