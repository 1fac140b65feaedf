use serde::Deserialize;

use crate::constants::EARTH_RADIUS_NM;
use crate::utils::angles::normalize_degrees;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airport {
    pub icao: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,  // degrees
    pub longitude: f64, // degrees
    pub elevation: f64, // ft
}

impl Airport {
    pub fn new(icao: &str, name: &str, latitude: f64, longitude: f64, elevation: f64) -> Self {
        Airport {
            icao: icao.to_string(),
            name: name.to_string(),
            city: String::new(),
            country: String::new(),
            latitude,
            longitude,
            elevation,
        }
    }

    pub fn paris_orly() -> Self {
        Airport {
            city: "Paris".to_string(),
            country: "France".to_string(),
            ..Airport::new("LFPO", "Paris Orly", 48.7233, 2.3794, 291.0)
        }
    }

    pub fn toulouse_blagnac() -> Self {
        Airport {
            city: "Toulouse".to_string(),
            country: "France".to_string(),
            ..Airport::new("LFBO", "Toulouse Blagnac", 43.6291, 1.3638, 499.0)
        }
    }

    /// Great-circle distance in nautical miles (haversine).
    pub fn distance_to(&self, other: &Airport) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_NM * c
    }

    /// Initial true bearing towards `other`, in `[0, 360)`.
    pub fn bearing_to(&self, other: &Airport) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        normalize_degrees(y.atan2(x).to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_distance_along_equator() {
        let a = Airport::new("AAAA", "A", 0.0, 0.0, 0.0);
        let b = Airport::new("BBBB", "B", 0.0, 1.0, 0.0);

        // one degree of arc is 60.04 nm on this earth radius
        assert_abs_diff_eq!(a.distance_to(&b), 60.04, epsilon = 0.01);
        assert_abs_diff_eq!(b.distance_to(&a), a.distance_to(&b), epsilon = 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Airport::new("AAAA", "A", 0.0, 0.0, 0.0);
        let east = Airport::new("EEEE", "E", 0.0, 1.0, 0.0);
        let north = Airport::new("NNNN", "N", 1.0, 0.0, 0.0);
        let west = Airport::new("WWWW", "W", 0.0, -1.0, 0.0);

        assert_abs_diff_eq!(origin.bearing_to(&east), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.bearing_to(&north), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.bearing_to(&west), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orly_to_toulouse() {
        let orly = Airport::paris_orly();
        let toulouse = Airport::toulouse_blagnac();

        let distance = orly.distance_to(&toulouse);
        let bearing = orly.bearing_to(&toulouse);

        assert!(distance > 300.0 && distance < 330.0, "got {}", distance);
        assert!(bearing > 180.0 && bearing < 225.0, "got {}", bearing);
    }
}
