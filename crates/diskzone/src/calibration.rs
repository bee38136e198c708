//! Pixel-to-millimeter calibration from a reference object of known size.

/// Known physical and pixel diameters of a calibration object (the petri dish).
///
/// The conversion is a plain linear scale; there is no lens distortion or
/// perspective correction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Diameter of the reference object in image pixels.
    pub reference_pixel_diameter: f32,
    /// Physical diameter of the reference object in millimeters.
    pub reference_mm_diameter: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            reference_pixel_diameter: 540.0,
            reference_mm_diameter: 90.0,
        }
    }
}

impl Calibration {
    pub fn new(reference_pixel_diameter: f32, reference_mm_diameter: f32) -> Self {
        Self {
            reference_pixel_diameter,
            reference_mm_diameter,
        }
    }

    /// Convert a length in pixels to millimeters.
    #[inline]
    pub fn px_to_mm(&self, pixels: f32) -> f32 {
        (pixels / self.reference_pixel_diameter) * self.reference_mm_diameter
    }

    /// Millimeters per pixel.
    pub fn mm_per_px(&self) -> f32 {
        self.reference_mm_diameter / self.reference_pixel_diameter
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !self.reference_pixel_diameter.is_finite() || self.reference_pixel_diameter <= 0.0 {
            return Err("calibration.reference_pixel_diameter must be finite and > 0".to_string());
        }
        if !self.reference_mm_diameter.is_finite() || self.reference_mm_diameter <= 0.0 {
            return Err("calibration.reference_mm_diameter must be finite and > 0".to_string());
        }
        Ok(())
    }
}
