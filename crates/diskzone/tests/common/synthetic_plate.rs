use image::{GrayImage, Luma};

/// Light plate (190) with solid dark zones (5) of the given centers and radius.
pub fn plate_with_zones(width: u32, height: u32, centers: &[[f32; 2]], radius: f32) -> GrayImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(radius > 0.0, "radius must be positive");

    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let inside = centers.iter().any(|c| {
                let dx = x as f32 - c[0];
                let dy = y as f32 - c[1];
                dx * dx + dy * dy < radius * radius
            });
            img.put_pixel(x, y, Luma([if inside { 5 } else { 190 }]));
        }
    }
    img
}
