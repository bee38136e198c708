//! diskzone — inhibition-zone measurement for disk-diffusion plates.
//!
//! A photographed agar plate carries antibiotic disks, each surrounded by a
//! clear zone where bacterial growth is inhibited. The crate
//!
//! 1. **Locates** disks with a strided raster scan for dark pixels, keeping
//!    only candidates far enough from disks already found.
//! 2. **Measures** each zone by walking left and right along one scanline.
//! 3. **Calibrates** the pixel width to millimeters against a reference
//!    object of known size.
//! 4. **Interprets** each diameter against antibiotic breakpoints as
//!    Susceptible, Intermediate or Resistant.
//!
//! The two halves can run in separate processes, coupled through the plain
//! text [`store`], or in one process through [`Analyzer`].
//!
//! # Public API
//! - [`PixelGrid`] for image input
//! - [`Locator`] / [`locate_disks`] and [`DiskSet`] for detection
//! - [`BreakpointTable`], [`interpret`] and [`classify_measurements`] for
//!   classification
//! - [`ZoneConfig`] for tuning and calibration

mod analyzer;
mod calibration;
mod config;
mod detector;
mod grid;
mod interpret;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use analyzer::{Analyzer, PlateAnalysis};
pub use calibration::Calibration;
pub use config::{ConfigError, InterpretConfig, ZoneConfig};
pub use detector::{locate_disks, measure_diameter, Disk, DiskSet, LocateConfig, Locator};
pub use grid::{DecodeError, PixelGrid};
pub use interpret::{
    classify_measurements, interpret, AntibioticBreakpoint, BreakpointTable, Category,
    ClassificationReport, ClassificationResult, FixedNames, Measurement, NameSource,
    NameSourceError, PromptedNames, DEFAULT_TABLE_CAPACITY,
};
