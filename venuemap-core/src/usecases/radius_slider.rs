use super::prelude::*;

pub const SLIDER_MAX: u16 = 1000;

/// Map a slider position onto the radius range.
///
/// The scale is logarithmic: `r = min * (max / min) ^ (s / 1000)`.
pub fn slider_to_radius(bounds: RadiusBounds, position: u16) -> Distance {
    let s = f64::from(position.min(SLIDER_MAX)) / f64::from(SLIDER_MAX);
    let min = bounds.min.to_meters();
    let max = bounds.max.to_meters();
    bounds.clamp(Distance::from_meters(min * (max / min).powf(s)))
}

pub fn radius_to_slider(bounds: RadiusBounds, radius: Distance) -> u16 {
    let min = bounds.min.to_meters();
    let max = bounds.max.to_meters();
    if max <= min {
        return 0;
    }
    let r = bounds.clamp(radius).to_meters();
    let s = (r / min).ln() / (max / min).ln() * f64::from(SLIDER_MAX);
    s.round().clamp(0.0, f64::from(SLIDER_MAX)) as u16
}
