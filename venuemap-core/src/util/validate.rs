use crate::entities::*;

/// Normalize a UK phone number to its national format.
///
/// All non-digits are removed, a leading country code `44`
/// is replaced by `0` and a missing leading `0` is added.
/// Returns `None` if no digits remain.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with('0') {
        return Some(digits);
    }
    if let Some(national) = digits.strip_prefix("44") {
        return Some(format!("0{national}"));
    }
    Some(format!("0{digits}"))
}

pub fn is_within_area(pos: MapPoint, area: &MapBbox) -> bool {
    pos.is_valid() && area.contains_point(pos)
}

pub fn is_valid_radius(radius: Distance) -> bool {
    radius.to_meters().is_finite() && radius.to_meters() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uk_phone_numbers() {
        assert_eq!(Some("01483123456".into()), normalize_phone("01483 123456"));
        assert_eq!(Some("07700900123".into()), normalize_phone("+44 7700 900123"));
        assert_eq!(Some("07700900123".into()), normalize_phone("447700900123"));
        assert_eq!(Some("07700900123".into()), normalize_phone("7700 900123"));
        assert_eq!(Some("0123".into()), normalize_phone("(123)"));
        assert_eq!(None, normalize_phone(" - "));
        assert_eq!(None, normalize_phone(""));
    }

    #[test]
    fn area_check() {
        let uk = MapBbox::new(
            MapPoint::from_lat_lng_deg(49.8, -8.2),
            MapPoint::from_lat_lng_deg(60.9, 1.8),
        );
        assert!(is_within_area(MapPoint::from_lat_lng_deg(51.5, -0.1), &uk));
        assert!(!is_within_area(MapPoint::from_lat_lng_deg(40.7, -74.0), &uk));
    }

    #[test]
    fn radius_check() {
        assert!(is_valid_radius(Distance::from_meters(1.0)));
        assert!(!is_valid_radius(Distance::from_meters(0.0)));
        assert!(!is_valid_radius(Distance::from_meters(-5.0)));
        assert!(!is_valid_radius(Distance::from_meters(f64::INFINITY)));
        assert!(!is_valid_radius(Distance::from_meters(f64::NAN)));
    }
}
