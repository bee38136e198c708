//! Disk locator: raster scan, greedy separation, edge-walk measurement.
//!
//! The scan visits lattice points row by row. A dark lattice point far enough
//! from every disk accepted so far is measured along its row; if the measured
//! width exceeds the noise floor it becomes a [`Disk`]. Earlier disks always
//! win over later overlapping candidates.

pub(crate) mod config;
pub(crate) mod dedup;
pub(crate) mod disk;
pub(crate) mod measure;
pub(crate) mod scan;

pub use config::LocateConfig;
pub use disk::{Disk, DiskSet};
pub use measure::measure_diameter;

use crate::config::ConfigError;
use crate::grid::PixelGrid;
use scan::ScanWindow;

/// Locate up to `config.max_disks` disks in `grid`.
///
/// No two returned disks are closer than `config.min_separation_px`.
/// Fails only when `config` does not validate.
pub fn locate_disks(grid: &PixelGrid, config: &LocateConfig) -> Result<DiskSet, ConfigError> {
    config.validate().map_err(ConfigError::new)?;
    Ok(scan_grid(grid, config))
}

/// Raster scan for an already validated `config` (`stride >= 1`).
pub(crate) fn scan_grid(grid: &PixelGrid, config: &LocateConfig) -> DiskSet {
    let mut disks = DiskSet::with_capacity(config.max_disks);
    if disks.is_full() {
        return disks;
    }

    let (w, h) = grid.dimensions();
    let Some(window) = ScanWindow::interior(w, h, config.margin) else {
        tracing::debug!(w, h, margin = config.margin, "grid too small to scan");
        return disks;
    };

    let stride = config.stride;
    let min_sep_sq = config.min_separation_sq();
    let mut n_candidates = 0usize;
    let mut n_suppressed = 0usize;
    let mut n_too_small = 0usize;

    for y in window.rows(stride) {
        let mut x = window.x0;
        while x < window.x1 {
            if scan::is_candidate(grid, x, y, config.dark_threshold) {
                n_candidates += 1;
                if !dedup::is_far_enough(disks.as_slice(), x, y, min_sep_sq) {
                    n_suppressed += 1;
                } else {
                    let diameter_px = measure_diameter(grid, x, y, config.dark_threshold);
                    if diameter_px > config.min_diameter_px {
                        let disk = Disk::new(x, y, diameter_px, &config.calibration);
                        tracing::debug!(
                            "disk {} at ({}, {}): {:.1} px -> {:.2} mm",
                            disks.len() + 1,
                            x,
                            y,
                            diameter_px,
                            disk.diameter_mm()
                        );
                        disks.push(disk);
                        if disks.is_full() {
                            tracing::debug!(max = config.max_disks, "disk cap reached");
                            return disks;
                        }
                        x = x.saturating_add(config.skip_after_accept);
                    } else {
                        n_too_small += 1;
                        tracing::trace!(x, y, diameter_px, "candidate below size floor");
                    }
                }
            }
            x = x.saturating_add(stride);
        }
    }

    tracing::debug!(
        n_candidates,
        n_suppressed,
        n_too_small,
        n_disks = disks.len(),
        "scan finished"
    );
    disks
}

/// Reusable locator bound to one configuration.
///
/// ```no_run
/// use diskzone::{Locator, LocateConfig, PixelGrid};
/// use std::path::Path;
///
/// let grid = PixelGrid::open(Path::new("plate.png")).unwrap();
/// let disks = Locator::new(LocateConfig::default()).locate(&grid).unwrap();
/// for disk in &disks {
///     println!("{:.2} mm", disk.diameter_mm());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Locator {
    config: LocateConfig,
}

impl Locator {
    pub fn new(config: LocateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocateConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LocateConfig {
        &mut self.config
    }

    /// Validates the current config (it may have been edited through
    /// [`Locator::config_mut`]) and scans `grid`.
    pub fn locate(&self, grid: &PixelGrid) -> Result<DiskSet, ConfigError> {
        locate_disks(grid, &self.config)
    }
}
