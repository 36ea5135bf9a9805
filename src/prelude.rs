//! Prelude module for common trailmap types
//!
//! This module re-exports the most commonly used types and functions for
//! easy importing with `use trailmap::prelude::*;`

pub use crate::core::{
    bounds::MapBounds,
    geo::{LatLng, Point},
    projection::{projection_named, MercatorProjection, Projection},
};

pub use crate::calibration::{
    calibrate, calibrate_auto, CalibrationError, CalibrationMethod, CalibrationPoint,
};

pub use crate::map::{
    descriptor::{
        Calibration, Level, MapDescriptor, Provider, Size, TileSize, DESCRIPTOR_FILENAME,
    },
    entities::{Marker, Route, RouteIdentity, Track, TrackPoint},
    import,
};

pub use crate::scan::{MapScanner, ScanCandidate, MAX_DEPTH};

pub use crate::archive::{unzip, zip, UnzipEvent, ZipEvent};

pub use crate::transfer::{DownloadEvent, DownloadHandle, Progress, TransferExecutor};

pub use crate::{Error as MapError, Result};
