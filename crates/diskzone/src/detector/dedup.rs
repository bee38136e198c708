use super::disk::Disk;

/// `true` when `(x, y)` is at least `min_separation` away from every accepted disk.
///
/// Distances are compared squared, so `min_separation_sq` must already be
/// squared. A candidate sitting exactly at the minimum distance is kept.
pub(crate) fn is_far_enough(accepted: &[Disk], x: u32, y: u32, min_separation_sq: u64) -> bool {
    accepted
        .iter()
        .all(|disk| disk.dist_sq_to(x, y) >= min_separation_sq)
}
