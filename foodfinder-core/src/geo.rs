use crate::model::Coordinate;

/// Mean Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two coordinates in miles, via the
/// haversine formula.
///
/// Both coordinates are assumed finite and within valid latitude/longitude
/// ranges; out-of-range input is the caller's responsibility.
pub fn distance_miles(origin: Coordinate, target: Coordinate) -> f64 {
    let d_lat = (target.latitude - origin.latitude).to_radians();
    let d_lon = (target.longitude - origin.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + origin.latitude.to_radians().cos()
            * target.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}
