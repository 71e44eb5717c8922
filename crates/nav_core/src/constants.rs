/// Distance type, in meters
pub type Distance = f64;

/// Mean Earth radius in meters, used by the great-circle formulas
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
