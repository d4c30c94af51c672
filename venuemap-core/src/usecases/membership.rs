use super::prelude::*;

/// All resolved venues within `radius` of `center`, nearest first.
pub fn circle_members(center: MapPoint, radius: Distance, venues: &[Venue]) -> Vec<Member> {
    let mut members: Vec<_> = venues
        .iter()
        .filter_map(|v| {
            let pos = v.pos?;
            MapPoint::distance(center, pos)
                .filter(|d| *d <= radius)
                .map(|d| (d, Member::new(v, pos, d)))
        })
        .collect();
    // stable: equidistant venues keep their source order
    members.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    members.into_iter().map(|(_, m)| m).collect()
}

pub fn refresh_members(circle: &mut Circle, venues: &[Venue]) {
    circle.members = circle_members(circle.center, circle.radius, venues);
    log::debug!(
        "Circle {} contains {} venue(s)",
        circle.id,
        circle.members.len()
    );
}
