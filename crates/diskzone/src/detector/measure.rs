//! Single-scanline edge walk for zone width.
//!
//! From a seed point the walk moves left and right along row `y` while the
//! samples stay dark. The width is the distance between the two stopping
//! positions, which are the first light pixel on each side (or the grid
//! boundary). The zone is assumed locally symmetric around the seed; no
//! radial or area measurement is attempted.

use crate::grid::PixelGrid;

/// Width in pixels of the dark run through `(x, y)` on row `y`.
///
/// Samples `< threshold` are dark. The left walk stops at column 0, the right
/// walk at `width`, so a dark run of `n` pixels strictly inside the grid
/// measures `n + 1`. A light seed measures `0`.
pub fn measure_diameter(grid: &PixelGrid, x: u32, y: u32, threshold: u8) -> f32 {
    let w = grid.width();
    debug_assert!(x < w && y < grid.height());

    let mut left = x;
    while left > 0 && grid.get(left, y) < threshold {
        left -= 1;
    }

    let mut right = x;
    while right < w && grid.get(right, y) < threshold {
        right += 1;
    }

    (right - left) as f32
}
