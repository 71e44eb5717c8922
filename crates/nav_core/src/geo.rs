//! Geodetic points and the great-circle math on top of them.
//!
//! All angular inputs are in degrees, all distances in meters. The formulas
//! work in-plane on latitude/longitude only; altitude is carried along for
//! the waypoint types but never enters the distance calculation here.

use serde::{Deserialize, Serialize};

use crate::constants::{Distance, EARTH_RADIUS_M};

/// A geodetic location: latitude and longitude in degrees, altitude in
/// meters above mean sea level.
///
/// The struct has no mutating methods; once constructed a point never moves.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        GeoPoint { lat, lon, alt }
    }

    /// Great-circle distance to `other` using the haversine formula.
    ///
    /// Symmetric in its arguments. The `asin` operand is clamped to `[0, 1]`
    /// so that round-off at identical or antipodal points cannot produce NaN.
    pub fn ground_distance(&self, other: &GeoPoint) -> Distance {
        let lat_a = self.lat.to_radians();
        let lat_b = other.lat.to_radians();
        let half_dlat = (other.lat - self.lat).to_radians() / 2.0;
        let half_dlon = (other.lon - self.lon).to_radians() / 2.0;

        let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlon.sin().powi(2);

        EARTH_RADIUS_M * 2.0 * h.sqrt().clamp(0.0, 1.0).asin()
    }

    /// Initial great-circle bearing towards `other`, in radians in
    /// `(-PI, PI]` relative to true north.
    ///
    /// Not symmetric. The planner itself has no use for this, but route
    /// consumers steering between waypoints do.
    pub fn bearing(&self, other: &GeoPoint) -> f64 {
        let lat_a = self.lat.to_radians();
        let lat_b = other.lat.to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let y = dlon.sin() * lat_b.cos();
        let x = lat_a.cos() * lat_b.sin() - lat_a.sin() * lat_b.cos() * dlon.cos();

        y.atan2(x)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn one_degree_on_the_equator() {
        let a = GeoPoint::new(0.0, 0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0, 0.0);

        // One degree of arc = R * PI / 180
        assert_relative_eq!(a.ground_distance(&b), 111_194.9266, max_relative = 1e-6);
    }

    #[test]
    fn identical_points_have_zero_distance() {
        let munich = GeoPoint::new(48.1372, 11.5755, 520.0);

        assert_eq!(munich.ground_distance(&munich), 0.0);
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let a = GeoPoint::new(0.0, 0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0, 0.0);

        let d = a.ground_distance(&b);
        assert!(d.is_finite());
        assert_relative_eq!(d, PI * EARTH_RADIUS_M, max_relative = 1e-6);
    }

    #[test]
    fn distance_is_symmetric() {
        let munich = GeoPoint::new(48.1372, 11.5755, 520.0);
        let berlin = GeoPoint::new(52.5200, 13.4050, 34.0);

        assert_relative_eq!(
            munich.ground_distance(&berlin),
            berlin.ground_distance(&munich),
            max_relative = 1e-12
        );
    }

    #[test]
    fn bearing_due_east_and_north() {
        let origin = GeoPoint::new(0.0, 0.0, 0.0);
        let east = GeoPoint::new(0.0, 1.0, 0.0);
        let north = GeoPoint::new(1.0, 0.0, 0.0);

        assert_relative_eq!(origin.bearing(&east), FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(origin.bearing(&north), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn bearing_is_not_symmetric() {
        let origin = GeoPoint::new(0.0, 0.0, 0.0);
        let west = GeoPoint::new(0.0, -1.0, 0.0);

        assert_relative_eq!(origin.bearing(&west), -FRAC_PI_2, epsilon = 1e-9);
        assert_relative_eq!(west.bearing(&origin), FRAC_PI_2, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn ground_distance_symmetric_everywhere(
            lat_a in -90.0f64..90.0,
            lon_a in -180.0f64..180.0,
            lat_b in -90.0f64..90.0,
            lon_b in -180.0f64..180.0,
        ) {
            let a = GeoPoint::new(lat_a, lon_a, 0.0);
            let b = GeoPoint::new(lat_b, lon_b, 0.0);

            let ab = a.ground_distance(&b);
            let ba = b.ground_distance(&a);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
        }

        #[test]
        fn ground_distance_finite_and_bounded(
            lat_a in -90.0f64..90.0,
            lon_a in -180.0f64..180.0,
            lat_b in -90.0f64..90.0,
            lon_b in -180.0f64..180.0,
        ) {
            let a = GeoPoint::new(lat_a, lon_a, 0.0);
            let b = GeoPoint::new(lat_b, lon_b, 0.0);

            let d = a.ground_distance(&b);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
            prop_assert!(d <= PI * EARTH_RADIUS_M + 1.0);
        }
    }
}
