use crate::calibration::Calibration;

/// Tuning for the raster-scan disk locator.
///
/// Defaults reproduce the reference imaging setup (540 px / 90 mm dish,
/// dark disks on a light plate).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Border (pixels) excluded from the scan on every side.
    pub margin: u32,
    /// Scan step (pixels) along both axes.
    pub stride: u32,
    /// Samples strictly below this value count as dark.
    pub dark_threshold: u8,
    /// Candidates measuring at or below this width (pixels) are dropped as noise.
    pub min_diameter_px: f32,
    /// Minimum center-to-center distance (pixels) between accepted disks.
    pub min_separation_px: u32,
    /// Extra horizontal advance (pixels) after a disk is accepted.
    pub skip_after_accept: u32,
    /// Maximum number of disks reported per image.
    pub max_disks: usize,
    /// Pixel-to-mm reference.
    pub calibration: Calibration,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            margin: 10,
            stride: 5,
            dark_threshold: 20,
            min_diameter_px: 20.0,
            min_separation_px: 200,
            skip_after_accept: 20,
            max_disks: 10,
            calibration: Calibration::default(),
        }
    }
}

impl LocateConfig {
    /// Squared minimum separation, compared against squared center distances.
    ///
    /// Any `u32` distance squares without overflow in `u64`.
    #[inline]
    pub fn min_separation_sq(&self) -> u64 {
        let d = self.min_separation_px as u64;
        d * d
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.stride == 0 {
            return Err("locate.stride must be >= 1".to_string());
        }
        if !self.min_diameter_px.is_finite() || self.min_diameter_px < 0.0 {
            return Err("locate.min_diameter_px must be finite and >= 0".to_string());
        }
        self.calibration.validate()
    }
}
