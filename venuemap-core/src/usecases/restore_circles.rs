use super::{circles::CircleSet, prelude::*};
use crate::util::validate::is_valid_radius;

/// Reject snapshots that cannot be restored at all.
pub fn check_snapshot(snapshot: &[CircleSnapshot]) -> Result<()> {
    for CircleSnapshot { id, center, radius } in snapshot {
        if !center.is_valid() {
            return Err(Error::InvalidImportData(format!(
                "circle {id} has an invalid center ({center})"
            )));
        }
        if !is_valid_radius(*radius) {
            return Err(Error::InvalidImportData(format!(
                "circle {id} has an invalid radius ({})",
                radius.to_meters()
            )));
        }
    }
    Ok(())
}

/// Renumber the circles to `1..=n` if necessary.
///
/// The new id of a circle is its position in the list of
/// all ids sorted ascending. The order of the circles is preserved.
pub fn repair_ids(mut snapshot: Vec<CircleSnapshot>) -> Vec<CircleSnapshot> {
    let mut sorted: Vec<_> = (0..snapshot.len()).collect();
    sorted.sort_by_key(|&idx| (snapshot[idx].id, idx));
    let contiguous = sorted
        .iter()
        .enumerate()
        .all(|(pos, &idx)| snapshot[idx].id as usize == pos + 1);
    if contiguous {
        return snapshot;
    }
    log::info!("Renumbering the ids of {} circle(s)", snapshot.len());
    for (pos, idx) in sorted.into_iter().enumerate() {
        let new_id = pos as CircleId + 1;
        log::debug!("Circle {} -> {}", snapshot[idx].id, new_id);
        snapshot[idx].id = new_id;
    }
    snapshot
}

/// Replace all circles of the set with the snapshot.
///
/// Invalid data is rejected as a whole and leaves the set untouched.
pub fn restore_circles(
    circles: &mut CircleSet,
    snapshot: Vec<CircleSnapshot>,
    venues: &[Venue],
) -> Result<()> {
    check_snapshot(&snapshot)?;
    let snapshot = repair_ids(snapshot);
    log::debug!("Restoring {} circle(s)", snapshot.len());
    circles.replace(snapshot, venues);
    Ok(())
}
