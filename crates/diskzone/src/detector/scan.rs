//! Raster scan window for dark-pixel candidates.
//!
//! Candidate centers are tested on a coarse lattice (every `stride` pixels)
//! inside a border of `margin` pixels. The lattice trades precision for speed:
//! a true center can be missed by up to `stride / 2` pixels.

use crate::grid::PixelGrid;

/// Half-open scan bounds `[start, end)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanWindow {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl ScanWindow {
    /// Interior of a `width x height` grid after removing `margin` on every side.
    ///
    /// Returns `None` when nothing is left to scan.
    pub fn interior(width: u32, height: u32, margin: u32) -> Option<Self> {
        let x1 = width.saturating_sub(margin);
        let y1 = height.saturating_sub(margin);
        if margin >= x1 || margin >= y1 {
            return None;
        }
        Some(Self {
            x0: margin,
            x1,
            y0: margin,
            y1,
        })
    }

    /// Row indices visited with the given stride (`>= 1`).
    pub fn rows(&self, stride: u32) -> impl Iterator<Item = u32> {
        (self.y0..self.y1).step_by(stride as usize)
    }
}

/// A lattice point is a candidate when its sample is strictly darker than `threshold`.
#[inline]
pub(crate) fn is_candidate(grid: &PixelGrid, x: u32, y: u32, threshold: u8) -> bool {
    grid.get(x, y) < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_excludes_margin() {
        let win = ScanWindow::interior(100, 80, 10).unwrap();
        assert_eq!(
            win,
            ScanWindow {
                x0: 10,
                x1: 90,
                y0: 10,
                y1: 70
            }
        );
        let rows: Vec<u32> = win.rows(5).collect();
        assert_eq!(rows.first(), Some(&10));
        assert_eq!(rows.last(), Some(&65));
    }

    #[test]
    fn tiny_grid_has_no_interior() {
        assert_eq!(ScanWindow::interior(20, 100, 10), None);
        assert_eq!(ScanWindow::interior(5, 5, 10), None);
        assert!(ScanWindow::interior(21, 21, 10).is_some());
    }

    #[test]
    fn candidate_threshold_is_strict() {
        let grid = PixelGrid::from_raw(3, 1, vec![19, 20, 21]).unwrap();
        assert!(is_candidate(&grid, 0, 0, 20));
        assert!(!is_candidate(&grid, 1, 0, 20));
        assert!(!is_candidate(&grid, 2, 0, 20));
    }
}
