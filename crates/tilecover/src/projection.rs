use std::f64::consts::PI;

use geo::Coord;

/// Latitude beyond which Web-Mercator is undefined; inputs are clamped to it.
pub const LATITUDE_MAX: f64 = 85.051128779806604;

/// Project a longitude/latitude pair (degrees) to fractional tile
/// coordinates at zoom `z`.
///
/// The result is in tile units: `x` and `y` run from `0` to `2^z` across the
/// world, with `y` growing southward. Longitudes outside `[-180, 180]` are not
/// wrapped, so callers see tiles left or right of the world and wrap them
/// afterwards.
pub fn project(lng: f64, lat: f64, z: u8) -> Coord<f64> {
    let lat = lat.clamp(-LATITUDE_MAX, LATITUDE_MAX);
    let world = 2f64.powi(i32::from(z));

    let x = (180.0 + lng) * world / 360.0;
    let y = (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) * world / 360.0;

    Coord { x, y }
}
