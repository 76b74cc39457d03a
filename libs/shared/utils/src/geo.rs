//! Great-circle distance between coordinate pairs.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two (lat, lng) points given in
/// degrees.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_coordinates_are_zero_km_apart() {
        assert_eq!(haversine_km(16.5449, 81.5212, 16.5449, 81.5212), 0.0);
    }

    #[test]
    fn known_city_pair_distance() {
        // Bhimavaram town centre to Eluru, roughly 48 km as the crow flies.
        let d = haversine_km(16.5449, 81.5212, 16.7107, 81.0952);
        assert!((45.0..52.0).contains(&d), "unexpected distance: {}", d);
    }

    #[test]
    fn short_hops_stay_under_a_kilometer() {
        let d = haversine_km(16.5449, 81.5212, 16.5465, 81.5230);
        assert!(d > 0.0 && d < 1.0, "unexpected distance: {}", d);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(16.5449, 81.5212, 16.7107, 81.0952);
        let ba = haversine_km(16.7107, 81.0952, 16.5449, 81.5212);
        assert!((ab - ba).abs() < 1e-9);
    }
}
