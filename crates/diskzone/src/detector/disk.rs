use crate::calibration::Calibration;
use crate::interpret::Measurement;

/// One detected antibiotic disk and the width of its inhibition zone.
///
/// The millimeter diameter is always derived from the pixel diameter through
/// a [`Calibration`]; there is no way to set it independently. Disks are
/// serialized for reports but never deserialized:
///
/// ```compile_fail
/// let disk: diskzone::Disk =
///     serde_json::from_str(r#"{"x":1,"y":1,"diameter_px":40,"diameter_mm":999}"#).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Disk {
    x: u32,
    y: u32,
    diameter_px: f32,
    diameter_mm: f32,
}

impl Disk {
    pub(crate) fn new(x: u32, y: u32, diameter_px: f32, calibration: &Calibration) -> Self {
        Self {
            x,
            y,
            diameter_px,
            diameter_mm: calibration.px_to_mm(diameter_px),
        }
    }

    /// Scan position the zone was measured from.
    pub fn center(&self) -> [u32; 2] {
        [self.x, self.y]
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn diameter_px(&self) -> f32 {
        self.diameter_px
    }

    pub fn diameter_mm(&self) -> f32 {
        self.diameter_mm
    }

    /// Squared center distance to `(x, y)`.
    #[inline]
    pub(crate) fn dist_sq_to(&self, x: u32, y: u32) -> u64 {
        let dx = self.x.abs_diff(x) as u64;
        let dy = self.y.abs_diff(y) as u64;
        (dx * dx).saturating_add(dy * dy)
    }

    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.diameter_mm)
    }
}

/// Disks in detection order, bounded by a capacity.
///
/// Only the locator fills a set, so capacity and separation always hold.
/// There is no deserializer that could bypass them:
///
/// ```compile_fail
/// let set: diskzone::DiskSet =
///     serde_json::from_str(r#"{"disks":[],"capacity":1}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DiskSet {
    disks: Vec<Disk>,
    capacity: usize,
}

impl DiskSet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            disks: Vec::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Append a disk. Returns `false` (and drops the disk) when full.
    pub(crate) fn push(&mut self, disk: Disk) -> bool {
        if self.is_full() {
            return false;
        }
        self.disks.push(disk);
        true
    }

    pub fn is_full(&self) -> bool {
        self.disks.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Disk> {
        self.disks.iter()
    }

    pub fn as_slice(&self) -> &[Disk] {
        &self.disks
    }

    /// Millimeter diameters in detection order, ready for the interpreter.
    pub fn measurements(&self) -> Vec<Measurement> {
        self.disks.iter().map(Disk::measurement).collect()
    }

    /// Smallest Euclidean distance between any two disk centers.
    pub fn min_pairwise_distance(&self) -> Option<f64> {
        let mut best: Option<u64> = None;
        for (i, a) in self.disks.iter().enumerate() {
            for b in &self.disks[i + 1..] {
                let d2 = a.dist_sq_to(b.x, b.y);
                best = Some(best.map_or(d2, |cur| cur.min(d2)));
            }
        }
        best.map(|d2| (d2 as f64).sqrt())
    }
}

impl<'a> IntoIterator for &'a DiskSet {
    type Item = &'a Disk;
    type IntoIter = std::slice::Iter<'a, Disk>;

    fn into_iter(self) -> Self::IntoIter {
        self.disks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimeters_follow_calibration() {
        let cal = Calibration::default();
        let disk = Disk::new(50, 50, 40.0, &cal);
        assert_eq!(disk.diameter_mm(), (40.0 / 540.0) * 90.0);
        assert_eq!(disk.measurement().diameter_mm(), disk.diameter_mm());
        assert_eq!(disk.center(), [50, 50]);
    }

    #[test]
    fn push_respects_capacity() {
        let cal = Calibration::default();
        let mut set = DiskSet::with_capacity(2);
        assert!(set.push(Disk::new(0, 0, 30.0, &cal)));
        assert!(set.push(Disk::new(300, 0, 30.0, &cal)));
        assert!(set.is_full());
        assert!(!set.push(Disk::new(600, 0, 30.0, &cal)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn pairwise_distance_uses_closest_pair() {
        let cal = Calibration::default();
        let mut set = DiskSet::with_capacity(4);
        assert_eq!(set.min_pairwise_distance(), None);
        set.push(Disk::new(0, 0, 30.0, &cal));
        set.push(Disk::new(300, 400, 30.0, &cal));
        set.push(Disk::new(300, 0, 30.0, &cal));
        assert_eq!(set.min_pairwise_distance(), Some(300.0));
    }

    #[test]
    fn far_corners_do_not_overflow_distance() {
        let cal = Calibration::default();
        let a = Disk::new(0, 0, 30.0, &cal);
        let d = u32::MAX as u64;
        assert_eq!(a.dist_sq_to(u32::MAX, 0), d * d);
        assert_eq!(a.dist_sq_to(u32::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn serialized_disk_carries_derived_millimeters() {
        let cal = Calibration::new(100.0, 60.0);
        let mut set = DiskSet::with_capacity(1);
        set.push(Disk::new(45, 35, 34.0, &cal));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["capacity"], 1);
        assert_eq!(json["disks"][0]["diameter_px"], 34.0);
        let mm = json["disks"][0]["diameter_mm"].as_f64().unwrap();
        assert_eq!(mm as f32, cal.px_to_mm(34.0));
    }
}
