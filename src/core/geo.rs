//! Geodesic helpers
//!
//! Bearing, distance and angular difference on a spherical Earth. All
//! functions are pure and total: degenerate input (identical points) yields
//! zero bearing and zero distance rather than an error.

use super::models::{Coordinate, PointOfInterest};

/// Mean Earth radius used by the haversine formula, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Reduce any finite angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let reduced = (degrees % 360.0 + 360.0) % 360.0;
    // Tiny negatives round up to exactly 360.0
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Initial great-circle bearing from `from` to `to`, clockwise from north.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lng - from.lng).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Haversine distance in meters.
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_phi = (to.lat - from.lat).to_radians();
    let delta_lambda = (to.lng - from.lng).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Smallest unsigned angle between two bearings, in [0, 180].
pub fn angular_delta(b1: f64, b2: f64) -> f64 {
    let diff = (b1 - b2).abs() % 360.0;
    180.0 - (180.0 - diff).abs()
}

/// Keep the positioned points that lie within `radius_m` of `center`.
///
/// Points without a position are dropped.
pub fn within_radius(
    points: &[PointOfInterest],
    center: Coordinate,
    radius_m: f64,
) -> Vec<PointOfInterest> {
    points
        .iter()
        .filter(|poi| {
            poi.position
                .map(|pos| distance(center, pos) <= radius_m)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}
