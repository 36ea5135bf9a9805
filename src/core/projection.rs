use crate::core::geo::{LatLng, Point};
use std::f64::consts::PI;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Planar projection used when calibration points are supplied as
/// geographic rather than already-projected coordinates.
pub trait Projection: Send + Sync {
    /// Identifier persisted in the map descriptor's calibration block.
    fn name(&self) -> &'static str;

    /// Projects a geographic coordinate, or `None` outside the projection
    /// domain.
    fn project(&self, lat_lng: &LatLng) -> Option<Point>;

    /// Inverse of [`Projection::project`].
    fn unproject(&self, point: &Point) -> Option<LatLng>;
}

/// Web Mercator projection (EPSG:3857)
#[derive(Debug, Default, Clone, Copy)]
pub struct MercatorProjection;

impl Projection for MercatorProjection {
    fn name(&self) -> &'static str {
        "Mercator"
    }

    fn project(&self, lat_lng: &LatLng) -> Option<Point> {
        if !lat_lng.is_valid() {
            return None;
        }
        let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Some(Point::new(x, y))
    }

    fn unproject(&self, point: &Point) -> Option<LatLng> {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        let lat_lng = LatLng::new(lat, lng);
        if lat_lng.is_valid() {
            Some(lat_lng)
        } else {
            None
        }
    }
}

/// Looks up a projection by the identifier stored in a descriptor.
pub fn projection_named(name: &str) -> Option<Box<dyn Projection>> {
    match name {
        "Mercator" | "EPSG:3857" => Some(Box::new(MercatorProjection)),
        _ => None,
    }
}
