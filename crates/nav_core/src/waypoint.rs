//! Waypoints: geodetic points specialized as graph vertices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::Distance;
use crate::geo::GeoPoint;

/// Stable waypoint identifier.
///
/// Identity is caller-supplied and opaque: two waypoints at identical
/// coordinates but different ids are distinct vertices, and every internal
/// map of the planner (adjacency, distance memo, closed set) keys off this
/// id rather than off coordinate equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct WaypointId(u64);

impl WaypointId {
    #[inline]
    pub fn new(id: u64) -> Self {
        WaypointId(id)
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for WaypointId {
    fn from(id: u64) -> Self {
        WaypointId(id)
    }
}

/// Short version of `WaypointId::new`
pub fn waypoint_id(id: u64) -> WaypointId {
    WaypointId::new(id)
}

/// A GPS-located vertex of the route graph.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub location: GeoPoint,
}

impl Waypoint {
    pub fn new(id: WaypointId, lat: f64, lon: f64, alt: f64) -> Self {
        Waypoint {
            id,
            location: GeoPoint::new(lat, lon, alt),
        }
    }

    /// Great-circle distance over ground to `other`, ignoring altitude.
    pub fn ground_distance_to(&self, other: &Waypoint) -> Distance {
        self.location.ground_distance(&other.location)
    }

    /// Straight-line distance to `other` including the altitude delta.
    ///
    /// Euclidean combination of ground distance and height difference, an
    /// approximation that only holds for short ranges where the interaction
    /// of curvature and altitude is negligible.
    pub fn true_distance_to(&self, other: &Waypoint) -> Distance {
        let ground = self.ground_distance_to(other);
        let dalt = self.location.alt - other.location.alt;

        (ground * ground + dalt * dalt).sqrt()
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} <lat {:.5}, lon {:.5}, alt {:.1} m>",
            self.id.value(),
            self.location.lat,
            self.location.lon,
            self.location.alt
        )
    }
}
