//! Shared test utilities for image-based unit tests.

use image::{GrayImage, Luma};

/// Render filled disks on a uniform background.
///
/// A pixel at distance `d` from a disk center is `disk_pix` when
/// `d < radius` for any of `disks`, otherwise `bg_pix`.
pub(crate) fn draw_disk_image(
    w: u32,
    h: u32,
    disks: &[([f32; 2], f32)],
    disk_pix: u8,
    bg_pix: u8,
) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let inside = disks.iter().any(|&(center, radius)| {
                let dx = x as f32 - center[0];
                let dy = y as f32 - center[1];
                dx * dx + dy * dy < radius * radius
            });
            let pix = if inside { disk_pix } else { bg_pix };
            img.put_pixel(x, y, Luma([pix]));
        }
    }
    img
}
