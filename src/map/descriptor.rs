use crate::calibration::{self, CalibrationMethod, CalibrationPoint};
use crate::core::bounds::MapBounds;
use crate::core::geo::Point;
use crate::MapError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// File name of the descriptor stored at a map directory's root
pub const DESCRIPTOR_FILENAME: &str = "map.json";

/// Pixel dimensions of one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSize {
    pub x: u32,
    pub y: u32,
}

/// One zoom level of the tile pyramid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub level: u32,
    pub tile_size: TileSize,
}

/// Origin of the tiles: which tool produced them and from which source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub generated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wmts_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_real_name: Option<String>,
    pub image_extension: String,
}

/// Overall pixel size of the map at full resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub x: u32,
    pub y: u32,
}

/// Calibration block of the descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
    pub calibration_method: CalibrationMethod,
    pub calibration_points: Vec<CalibrationPoint>,
}

/// Persisted metadata describing one tile-pyramid map.
///
/// Loaded once from a scan or an import, optionally mutated in place, and
/// saved back to the map directory. The projected bounds are derived from
/// the calibration block and recomputed whenever the calibration points
/// change; they are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub levels: Vec<Level>,
    pub provider: Provider,
    pub size: Size,
    pub calibration: Calibration,
    #[serde(skip)]
    bounds: Option<MapBounds>,
}

impl MapDescriptor {
    /// Creates a descriptor and derives its bounds from the calibration
    pub fn new(
        name: String,
        levels: Vec<Level>,
        provider: Provider,
        size: Size,
        calibration: Calibration,
    ) -> Self {
        let mut descriptor = Self {
            name,
            thumbnail: None,
            levels,
            provider,
            size,
            calibration,
            bounds: None,
        };
        descriptor.refresh_bounds();
        descriptor
    }

    /// Reads and calibrates the descriptor stored in `dir`
    pub fn load(dir: &Path) -> Result<Self, MapError> {
        let file = File::open(dir.join(DESCRIPTOR_FILENAME))?;
        let mut descriptor: MapDescriptor = serde_json::from_reader(BufReader::new(file))?;
        descriptor.refresh_bounds();
        Ok(descriptor)
    }

    /// Writes the descriptor back to `dir`
    pub fn save(&self, dir: &Path) -> Result<(), MapError> {
        let file = File::create(dir.join(DESCRIPTOR_FILENAME))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Projected bounds derived from the calibration points.
    ///
    /// `None` when the calibration is degenerate or incomplete; callers
    /// must check before using the map for coordinate lookups.
    pub fn bounds(&self) -> Option<MapBounds> {
        self.bounds
    }

    /// Replaces the calibration points and recomputes the bounds
    pub fn set_calibration_points(&mut self, points: Vec<CalibrationPoint>) {
        self.calibration.calibration_points = points;
        self.refresh_bounds();
    }

    /// Full-resolution pixel position of a projected coordinate
    pub fn projected_to_pixel(&self, x: f64, y: f64) -> Option<Point> {
        let bounds = self.bounds?;
        let (nx, ny) = bounds.relative_of(x, y)?;
        Some(Point::new(
            nx * self.size.x as f64,
            ny * self.size.y as f64,
        ))
    }

    fn refresh_bounds(&mut self) {
        self.bounds = match calibration::calibrate(
            self.calibration.calibration_method,
            &self.calibration.calibration_points,
        ) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                log::warn!("map \"{}\" cannot be calibrated: {}", self.name, e);
                None
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "Mont Blanc",
        "thumbnail": "thumbnail.png",
        "levels": [
            { "level": 0, "tile_size": { "x": 256, "y": 256 } },
            { "level": 1, "tile_size": { "x": 256, "y": 256 } }
        ],
        "provider": {
            "generated_by": "trailmap",
            "wmts_source": "IGN",
            "image_extension": "jpg"
        },
        "size": { "x": 2048, "y": 1024 },
        "calibration": {
            "projection": "Mercator",
            "calibration_method": "2POINTS",
            "calibration_points": [
                { "x": 0.0, "y": 0.0, "proj_x": 0.0, "proj_y": 0.0 },
                { "x": 1.0, "y": 1.0, "proj_x": 200.0, "proj_y": 100.0 }
            ]
        }
    }"#;

    fn sample() -> MapDescriptor {
        let mut descriptor: MapDescriptor = serde_json::from_str(SAMPLE).unwrap();
        descriptor.refresh_bounds();
        descriptor
    }

    #[test]
    fn test_descriptor_schema() {
        let descriptor = sample();
        assert_eq!(descriptor.name, "Mont Blanc");
        assert_eq!(descriptor.levels.len(), 2);
        assert_eq!(descriptor.levels[0].tile_size.x, 256);
        assert_eq!(descriptor.provider.wmts_source.as_deref(), Some("IGN"));
        assert_eq!(descriptor.provider.layer_real_name, None);
        assert_eq!(
            descriptor.calibration.calibration_method,
            CalibrationMethod::TwoPoints
        );
        assert_eq!(descriptor.calibration.calibration_points.len(), 2);
    }

    #[test]
    fn test_bounds_derived_on_load() {
        let descriptor = sample();
        assert_eq!(descriptor.bounds(), Some(MapBounds::new(0.0, 0.0, 200.0, 100.0)));
    }

    #[test]
    fn test_bounds_recomputed_on_point_change() {
        let mut descriptor = sample();
        descriptor.set_calibration_points(vec![
            CalibrationPoint::new(0.0, 0.0, 0.0, 0.0),
            CalibrationPoint::new(1.0, 1.0, 400.0, 200.0),
        ]);
        assert_eq!(descriptor.bounds(), Some(MapBounds::new(0.0, 0.0, 400.0, 200.0)));

        // degenerate points clear the bounds instead of failing the call
        descriptor.set_calibration_points(vec![
            CalibrationPoint::new(0.5, 0.0, 0.0, 0.0),
            CalibrationPoint::new(0.5, 1.0, 400.0, 200.0),
        ]);
        assert_eq!(descriptor.bounds(), None);
    }

    #[test]
    fn test_projected_to_pixel() {
        let descriptor = sample();
        let pixel = descriptor.projected_to_pixel(100.0, 50.0).unwrap();
        assert_eq!(pixel, Point::new(1024.0, 512.0));
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = sample();
        descriptor.save(dir.path()).unwrap();

        let loaded = MapDescriptor::load(dir.path()).unwrap();
        assert_eq!(loaded, descriptor);
        assert_eq!(loaded.bounds(), descriptor.bounds());
    }

    #[test]
    fn test_optional_fields_not_serialized() {
        let mut descriptor = sample();
        descriptor.thumbnail = None;
        descriptor.provider.wmts_source = None;

        let json = serde_json::to_value(&descriptor).unwrap();
        assert!(json.get("thumbnail").is_none());
        assert!(json["provider"].get("wmts_source").is_none());
    }
}
